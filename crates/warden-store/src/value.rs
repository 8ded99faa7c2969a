use crate::{Error, Result};

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use serde::Serialize;

/// A primitive value bound to, or read back from, the engine.
///
/// Every record field reduces to one of these before it touches the
/// connection: scalars via [`FieldType`](crate::FieldType), opaque-encoded
/// fields via [`encode_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Converts an engine value read from a row.
    pub(crate) fn from_sql(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Integer(value) => Ok(Value::Integer(value)),
            SqlValue::Real(value) => Ok(Value::Real(value)),
            SqlValue::Text(value) => Ok(Value::Text(value)),
            // No descriptor maps to a BLOB column; a blob means the table
            // was written by something other than this store.
            SqlValue::Blob(_) => Err(Error::cannot_convert("a column value", "BLOB")),
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::Integer(value) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*value))),
            Value::Real(value) => Ok(ToSqlOutput::Owned(SqlValue::Real(*value))),
            Value::Text(value) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes()))),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

/// Serializes an opaque-encoded field to its TEXT representation.
///
/// The wire format is JSON; round-trip fidelity (including empty-vs-absent
/// distinctions) is part of the store's contract.
pub fn encode_json<T: Serialize + ?Sized>(column: &'static str, value: &T) -> Result<Value> {
    match serde_json::to_string(value) {
        Ok(text) => Ok(Value::Text(text)),
        Err(err) => Err(Error::codec(err).context(format!("encode column `{column}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sql_maps_storage_classes() {
        assert_eq!(Value::from_sql(SqlValue::Null).unwrap(), Value::Null);
        assert_eq!(Value::from_sql(SqlValue::Integer(7)).unwrap(), Value::Integer(7));
        assert_eq!(Value::from_sql(SqlValue::Real(1.5)).unwrap(), Value::Real(1.5));
        assert_eq!(
            Value::from_sql(SqlValue::Text("hi".into())).unwrap(),
            Value::Text("hi".into())
        );
    }

    #[test]
    fn from_sql_rejects_blob() {
        let err = Value::from_sql(SqlValue::Blob(vec![1, 2])).unwrap_err();
        assert!(err.is_codec());
    }

    #[test]
    fn encode_json_distinguishes_empty_and_absent() {
        let empty: Vec<i64> = vec![];
        assert_eq!(encode_json("xs", &empty).unwrap(), Value::Text("[]".into()));

        let absent: Option<Vec<i64>> = None;
        assert_eq!(encode_json("xs", &absent).unwrap(), Value::Text("null".into()));
    }
}
