//! Role-based access control over an embedded SQLite database.
//!
//! [`Rbac`] answers "can user U do action P?" by composing three typed
//! [`Store`]s — permissions, roles, users — built on the `warden-store`
//! record-to-relation mapping layer:
//!
//! ```ignore
//! use warden::{models::User, Rbac};
//!
//! let rbac = Rbac::open("rbac.db")?;
//! rbac.users.insert(&User { id: 0, user_id: "alice".into(), roles: vec![1] })?;
//! assert!(rbac.has_permission("alice", 42)?);
//! ```
//!
//! Permission resolution is re-read from the stores on every call; there
//! is no caching layer.

pub mod models;

mod rbac;
pub use rbac::Rbac;

pub use warden_store::{Error, Record, Result, Store};
