use crate::{schema::Column, Error, FieldType, Result, Value};

use serde::de::DeserializeOwned;

/// The per-record-type persistence contract.
///
/// Usually implemented with `#[derive(Record)]`, which emits the descriptor
/// table, the bind list, and the decode sequence from a single pass over
/// the struct's fields. Hand-written impls must keep all three in the same
/// field order; [`Store::open`](crate::Store::open) validates the
/// descriptor table but cannot check the ordering agreement.
pub trait Record: Sized {
    /// Table name: the lower-case underscore form of the record type name.
    const TABLE: &'static str;

    /// Column descriptors, in the record's own field order.
    const COLUMNS: &'static [Column];

    /// Produces the bind values for every column, in descriptor order.
    ///
    /// The primary-key value is included at its position; the store skips
    /// it where a statement excludes the key.
    fn to_row(&self) -> Result<Vec<Value>>;

    /// Reconstructs a record from a row, consuming columns in descriptor
    /// order.
    fn load(row: &mut RowCursor) -> Result<Self>;
}

/// Cursor over one fetched row's values, in descriptor order.
pub struct RowCursor {
    columns: &'static [Column],
    values: std::vec::IntoIter<Value>,
    pos: usize,
}

impl RowCursor {
    pub(crate) fn new(columns: &'static [Column], values: Vec<Value>) -> Self {
        RowCursor {
            columns,
            values: values.into_iter(),
            pos: 0,
        }
    }

    /// Reads the next scalar column.
    pub fn read<T: FieldType>(&mut self) -> Result<T> {
        let (column, value) = self.take()?;
        T::load(value).map_err(|err| err.context(format!("column `{column}`")))
    }

    /// Reads the next opaque-encoded column.
    ///
    /// A NULL or empty cell decodes to the container's `Default` value;
    /// a non-empty blob that fails to parse is an error.
    pub fn read_json<T: DeserializeOwned + Default>(&mut self) -> Result<T> {
        let (column, value) = self.take()?;
        let text = match value {
            Value::Null => return Ok(T::default()),
            Value::Text(text) if text.is_empty() => return Ok(T::default()),
            Value::Text(text) => text,
            other => {
                return Err(Error::cannot_convert("TEXT", other.type_name())
                    .context(format!("column `{column}`")))
            }
        };
        serde_json::from_str(&text)
            .map_err(|err| Error::codec(err).context(format!("column `{column}`")))
    }

    fn take(&mut self) -> Result<(&'static str, Value)> {
        let column = self
            .columns
            .get(self.pos)
            .map(|column| column.name)
            .unwrap_or("<past end>");
        self.pos += 1;
        match self.values.next() {
            Some(value) => Ok((column, value)),
            None => Err(Error::msg(format!("row ended before column `{column}`"))),
        }
    }
}
