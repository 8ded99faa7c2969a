//! Typed record-to-relation mapping over embedded SQLite.
//!
//! A [`Store`] persists one record type in one flat table. The record
//! type declares its storage shape with `#[derive(Record)]`:
//!
//! ```ignore
//! use warden_store::{Record, Store};
//!
//! #[derive(Debug, Record)]
//! struct User {
//!     #[key]
//!     id: i64,
//!     #[unique]
//!     user_id: String,
//!     #[json]
//!     roles: Vec<i64>,
//! }
//!
//! let users: Store<User> = Store::open("app.db")?;
//! let id = users.insert(&User { id: 0, user_id: "alice".into(), roles: vec![1] })?;
//! let alice = users.get_one(id)?;
//! ```
//!
//! The derive turns field metadata into a static column descriptor table
//! and a matching codec, so schema DDL, bind order, and decode order are
//! fixed at compile time. Field attributes:
//!
//! - `#[key]` — primary key (exactly one per record; INTEGER, row-id
//!   assigned by the engine on insert)
//! - `#[index]` / `#[index(desc)]` — ascending / descending index; if both
//!   markers appear on one field, ascending wins
//! - `#[unique]` — unique index (ascending when no `#[index]` is present)
//! - `#[json]` — store the field as an opaque JSON blob in a TEXT column
//! - `#[column("name")]` — override the column name
//!
//! Scalar fields must implement [`FieldType`]; collections, nested structs,
//! and `Option` forms of them must be marked `#[json]`. `Option` of a
//! scalar is rejected at compile time.

mod error;
pub use error::Error;

pub mod schema;

mod sql;

mod value;
pub use value::{encode_json, Value};

mod field;
pub use field::FieldType;

mod record;
pub use record::{Record, RowCursor};

mod store;
pub use store::Store;

pub use warden_macros::Record;

/// A Result type alias that uses Warden's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

#[doc(hidden)]
pub mod codegen_support {
    //! Flat re-exports for `#[derive(Record)]`-generated code.

    pub use crate::{
        encode_json,
        schema::{Column, ColumnType, IndexOp},
        FieldType, Record, Result, RowCursor, Value,
    };
}
