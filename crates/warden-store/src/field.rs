use crate::{schema::ColumnType, Error, Result, Value};

/// A scalar field type that maps directly to one storage class.
///
/// Composite and collection types do not implement this trait; they are
/// stored opaque-encoded (`#[json]`). `Option<T>` deliberately has no impl
/// either: a nullable scalar column has ambiguous NULL-vs-zero semantics,
/// so the derive rejects it at compile time by requiring this bound.
pub trait FieldType: Sized {
    /// Storage class used for columns of this type.
    const TYPE: ColumnType;

    fn to_value(&self) -> Value;

    fn load(value: Value) -> Result<Self>;
}

impl FieldType for bool {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value != 0),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for i8 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as i8),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for i16 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as i16),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for i32 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as i32),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for i64 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for u8 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as u8),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for u16 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as u16),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for u32 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as u32),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

// SQLite has no unsigned 64-bit storage class; values round-trip through
// the i64 bit pattern.
impl FieldType for u64 {
    const TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Integer(value) => Ok(value as u64),
            other => Err(Error::cannot_convert("INTEGER", other.type_name())),
        }
    }
}

impl FieldType for f32 {
    const TYPE: ColumnType = ColumnType::Real;

    fn to_value(&self) -> Value {
        Value::Real(*self as f64)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Real(value) => Ok(value as f32),
            other => Err(Error::cannot_convert("REAL", other.type_name())),
        }
    }
}

impl FieldType for f64 {
    const TYPE: ColumnType = ColumnType::Real;

    fn to_value(&self) -> Value {
        Value::Real(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Real(value) => Ok(value),
            other => Err(Error::cannot_convert("REAL", other.type_name())),
        }
    }
}

impl FieldType for String {
    const TYPE: ColumnType = ColumnType::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Text(value) => Ok(value),
            other => Err(Error::cannot_convert("TEXT", other.type_name())),
        }
    }
}
