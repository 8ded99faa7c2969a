use crate::{Error, Result};

/// The storage class backing a column.
///
/// SQLite stores everything in one of a handful of storage classes; the
/// mapping from field types is: integers and booleans → `Integer`, strings →
/// `Text`, floating point → `Real`. Opaque-encoded fields always use `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    Real,
}

impl ColumnType {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Real => "REAL",
        }
    }
}

/// The comparison order used to index a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOp {
    Asc,
    Desc,
}

/// Describes how one record field is stored.
///
/// The descriptor's position in [`Record::COLUMNS`] is its column ordinal:
/// the bind list produced by [`Record::to_row`] and the decode sequence in
/// [`Record::load`] follow the same order. The derive macro emits all three
/// from one pass over the struct's fields, so they cannot drift apart.
///
/// [`Record::COLUMNS`]: crate::Record::COLUMNS
/// [`Record::to_row`]: crate::Record::to_row
/// [`Record::load`]: crate::Record::load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: &'static str,

    /// The storage class of the column.
    pub ty: ColumnType,

    /// True if this column is the table's primary key.
    pub primary_key: bool,

    /// True if values are serialized to a JSON blob before binding.
    pub json: bool,

    /// Index over this column, if any.
    pub index: Option<IndexOp>,

    /// When `true`, indexed entries are unique. Uniqueness is enforced by
    /// the index, not by a column constraint; a unique column with no
    /// explicit index gets an ascending one.
    pub unique: bool,
}

/// Checks a descriptor table before any DDL is derived from it.
///
/// The derive macro cannot produce a table that fails here; this defends
/// against hand-written [`Record`](crate::Record) impls. Returns the
/// primary-key column.
pub(crate) fn validate(table: &str, columns: &'static [Column]) -> Result<&'static Column> {
    let mut pk = None;
    for column in columns {
        if !column.primary_key {
            continue;
        }
        if pk.is_some() {
            return Err(Error::invalid_schema(format!(
                "table `{table}` has more than one primary key column"
            )));
        }
        pk = Some(column);
    }

    let Some(pk) = pk else {
        return Err(Error::invalid_schema(format!(
            "table `{table}` has no primary key column"
        )));
    };

    // Inserts return the engine-assigned row id, which requires a
    // rowid-aliased key.
    if pk.ty != ColumnType::Integer {
        return Err(Error::invalid_schema(format!(
            "table `{table}` primary key `{}` must be INTEGER",
            pk.name
        )));
    }

    for (i, column) in columns.iter().enumerate() {
        if columns[..i].iter().any(|prev| prev.name == column.name) {
            return Err(Error::invalid_schema(format!(
                "table `{table}` has duplicate column `{}`",
                column.name
            )));
        }
    }

    Ok(pk)
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn column(name: &'static str, ty: ColumnType) -> Column {
        Column {
            name,
            ty,
            primary_key: false,
            json: false,
            index: None,
            unique: false,
        }
    }

    const fn key(name: &'static str) -> Column {
        Column {
            name,
            ty: ColumnType::Integer,
            primary_key: true,
            json: false,
            index: None,
            unique: false,
        }
    }

    #[test]
    fn accepts_single_integer_key() {
        static COLUMNS: &[Column] = &[key("id"), column("name", ColumnType::Text)];
        let pk = validate("thing", COLUMNS).unwrap();
        assert_eq!(pk.name, "id");
    }

    #[test]
    fn rejects_missing_key() {
        static COLUMNS: &[Column] = &[column("name", ColumnType::Text)];
        let err = validate("thing", COLUMNS).unwrap_err();
        assert!(err.is_invalid_schema());
        assert_eq!(err.to_string(), "invalid schema: table `thing` has no primary key column");
    }

    #[test]
    fn rejects_duplicate_key() {
        static COLUMNS: &[Column] = &[key("id"), key("other")];
        assert!(validate("thing", COLUMNS).unwrap_err().is_invalid_schema());
    }

    #[test]
    fn rejects_non_integer_key() {
        static COLUMNS: &[Column] = &[Column {
            name: "id",
            ty: ColumnType::Text,
            primary_key: true,
            json: false,
            index: None,
            unique: false,
        }];
        assert!(validate("thing", COLUMNS).unwrap_err().is_invalid_schema());
    }

    #[test]
    fn rejects_duplicate_column_names() {
        static COLUMNS: &[Column] = &[
            key("id"),
            column("name", ColumnType::Text),
            column("name", ColumnType::Text),
        ];
        assert!(validate("thing", COLUMNS).unwrap_err().is_invalid_schema());
    }
}
