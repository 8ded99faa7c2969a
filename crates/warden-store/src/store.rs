use crate::{schema, sql, Error, Record, Result, RowCursor, Value};

use rusqlite::Connection;
use std::{
    marker::PhantomData,
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tracing::debug;

/// How long the engine retries a statement that hits `SQLITE_BUSY` before
/// surfacing the error. Only cross-process writers can contend; in-process
/// callers serialize on the connection mutex.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A relational store for one record type.
///
/// Construction connects to the engine, applies WAL journaling and
/// throughput-oriented durability tuning, validates the record's column
/// descriptors, and idempotently creates the table and its indexes. After
/// that, every operation is one synchronous, atomic statement.
///
/// The store is `Send + Sync`; share it across threads with `Arc`. Each
/// call binds its own parameters on a statement checked out from the
/// connection's prepared-statement cache.
#[derive(Debug)]
pub struct Store<R: Record> {
    conn: Mutex<Connection>,
    table: &'static str,
    primary_key: &'static str,
    select_one: String,
    select_all: String,
    insert: String,
    update: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Store<R> {
    /// Opens (creating if needed) the store backed by the database file at
    /// `path`.
    ///
    /// All stores opened against the same path share one physical database
    /// file; each record type gets its own table in it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|err| Error::driver(err).context(format!("`{}` open failed", R::TABLE)))?;
        Self::init(conn)
    }

    /// Opens a store backed by a fresh in-memory database.
    ///
    /// In-memory databases are per-connection: two in-memory stores never
    /// see each other's data.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|err| Error::driver(err).context(format!("`{}` open failed", R::TABLE)))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let table = R::TABLE;
        let step = |op: &'static str, err: rusqlite::Error| {
            Error::driver(err).context(format!("`{table}` {op} failed"))
        };

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|err| step("journal_mode pragma", err))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|err| step("synchronous pragma", err))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|err| step("busy_timeout", err))?;

        let primary_key = schema::validate(table, R::COLUMNS)?.name;

        conn.execute(&sql::create_table(table, R::COLUMNS), [])
            .map_err(|err| step("create table", err))?;
        for stmt in sql::create_indexes(table, R::COLUMNS) {
            conn.execute(&stmt, [])
                .map_err(|err| step("create index", err))?;
        }

        debug!(table, "table and indexes ready");

        Ok(Store {
            conn: Mutex::new(conn),
            table,
            primary_key,
            select_one: sql::select_by_pk(table, R::COLUMNS, primary_key),
            select_all: sql::select_all(table, R::COLUMNS),
            insert: sql::insert(table, R::COLUMNS),
            update: sql::update(table, R::COLUMNS, primary_key),
            _record: PhantomData,
        })
    }

    /// Inserts a record and returns the engine-assigned identifier.
    ///
    /// The record's own primary-key value is ignored; the engine assigns
    /// the next row id.
    pub fn insert(&self, record: &R) -> Result<i64> {
        let values = self.bind_values(record)?;
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&self.insert)
            .map_err(|err| self.driver("insert", err))?;
        stmt.execute(rusqlite::params_from_iter(values.iter()))
            .map_err(|err| self.driver("insert", err))?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrites the record stored under `id`.
    ///
    /// Returns the not-found error if `id` does not exist; zero rows
    /// affected is checked explicitly, never inferred from a driver error.
    pub fn update(&self, id: i64, record: &R) -> Result<()> {
        let mut values = self.bind_values(record)?;
        values.push(Value::Integer(id));
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&self.update)
            .map_err(|err| self.driver("update", err))?;
        let affected = stmt
            .execute(rusqlite::params_from_iter(values.iter()))
            .map_err(|err| self.driver("update", err))?;
        if affected == 0 {
            return Err(Error::record_not_found());
        }
        Ok(())
    }

    /// Fetches the record stored under `id`, or the not-found error.
    pub fn get_one(&self, id: i64) -> Result<R> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&self.select_one)
            .map_err(|err| self.driver("get_one", err))?;
        let mut rows = stmt.query([id]).map_err(|err| self.driver("get_one", err))?;
        match rows.next().map_err(|err| self.driver("get_one", err))? {
            Some(row) => self.decode_row("get_one", row),
            None => Err(Error::record_not_found()),
        }
    }

    /// Fetches every record whose primary key is in `ids`.
    ///
    /// Missing ids are silently absent from the result; the result carries
    /// no ordering or count guarantee relative to the input.
    pub fn get_multi(&self, ids: &[i64]) -> Result<Vec<R>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = sql::select_in(self.table, R::COLUMNS, self.primary_key, ids.len());
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&query)
            .map_err(|err| self.driver("get_multi", err))?;
        let rows = stmt
            .query(rusqlite::params_from_iter(ids.iter()))
            .map_err(|err| self.driver("get_multi", err))?;
        self.decode_rows("get_multi", rows)
    }

    /// Fetches every record in the table.
    pub fn get_all(&self) -> Result<Vec<R>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&self.select_all)
            .map_err(|err| self.driver("get_all", err))?;
        let rows = stmt.query([]).map_err(|err| self.driver("get_all", err))?;
        self.decode_rows("get_all", rows)
    }

    /// Fetches every record whose `column` equals `value`.
    ///
    /// The column does not need to be indexed, but it must exist in the
    /// record's descriptor table; an unknown name is rejected before the
    /// engine sees it.
    pub fn find_by(&self, column: &str, value: impl Into<Value>) -> Result<Vec<R>> {
        if !R::COLUMNS.iter().any(|c| c.name == column) {
            return Err(Error::unknown_column(self.table, column));
        }
        let query = sql::select_by_column(self.table, R::COLUMNS, column);
        let value = value.into();
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&query)
            .map_err(|err| self.driver("find_by", err))?;
        let rows = stmt.query([&value]).map_err(|err| self.driver("find_by", err))?;
        self.decode_rows("find_by", rows)
    }

    /// Deletes every record whose primary key is in `ids`.
    ///
    /// Returns the not-found error when nothing was deleted, including for
    /// an empty `ids`.
    pub fn delete_multi(&self, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::record_not_found());
        }
        let query = sql::delete_in(self.table, self.primary_key, ids.len());
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(&query)
            .map_err(|err| self.driver("delete_multi", err))?;
        let affected = stmt
            .execute(rusqlite::params_from_iter(ids.iter()))
            .map_err(|err| self.driver("delete_multi", err))?;
        if affected == 0 {
            return Err(Error::record_not_found());
        }
        Ok(())
    }

    /// Closes the store, releasing cached statements and the connection.
    ///
    /// Dropping the store closes it implicitly; this form surfaces the
    /// engine's shutdown error instead of discarding it.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        conn.close()
            .map_err(|(_, err)| Error::driver(err).context(format!("`{}` close failed", self.table)))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned mutex only means another caller panicked mid-call;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind values for statements that exclude the primary-key column.
    fn bind_values(&self, record: &R) -> Result<Vec<Value>> {
        let values = record.to_row()?;
        if values.len() != R::COLUMNS.len() {
            return Err(Error::invalid_schema(format!(
                "table `{}`: to_row produced {} values for {} columns",
                self.table,
                values.len(),
                R::COLUMNS.len()
            )));
        }
        Ok(values
            .into_iter()
            .zip(R::COLUMNS)
            .filter(|(_, column)| !column.primary_key)
            .map(|(value, _)| value)
            .collect())
    }

    fn decode_rows(&self, op: &'static str, mut rows: rusqlite::Rows<'_>) -> Result<Vec<R>> {
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(|err| self.driver(op, err))? {
            records.push(self.decode_row(op, row)?);
        }
        Ok(records)
    }

    fn decode_row(&self, op: &'static str, row: &rusqlite::Row<'_>) -> Result<R> {
        self.decode_row_inner(row).map_err(|err| {
            debug!(table = self.table, op, "row decode failed");
            err.context(format!("`{}` {op} failed to decode row", self.table))
        })
    }

    fn decode_row_inner(&self, row: &rusqlite::Row<'_>) -> Result<R> {
        let mut values = Vec::with_capacity(R::COLUMNS.len());
        for (i, column) in R::COLUMNS.iter().enumerate() {
            let value: rusqlite::types::Value = row.get(i).map_err(Error::driver)?;
            values.push(
                Value::from_sql(value)
                    .map_err(|err| err.context(format!("column `{}`", column.name)))?,
            );
        }
        R::load(&mut RowCursor::new(R::COLUMNS, values))
    }

    fn driver(&self, op: &'static str, err: rusqlite::Error) -> Error {
        Error::driver(err).context(format!("`{}` {op} failed", self.table))
    }
}
