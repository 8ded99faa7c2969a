//! The record types the access-control layer is defined over.

use warden_store::Record;

/// A single grantable action.
#[derive(Debug, Clone, PartialEq, Record)]
pub struct Permission {
    #[key]
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A named set of permissions.
#[derive(Debug, Clone, PartialEq, Record)]
pub struct Role {
    #[key]
    pub id: i64,
    pub name: String,
    pub description: String,
    #[json]
    pub permissions: Vec<i64>,
}

/// An externally-identified principal and the roles granted to it.
///
/// `user_id` is the application's identifier (login, subject claim, …);
/// the unique index makes it the lookup field for permission queries.
#[derive(Debug, Clone, PartialEq, Record)]
pub struct User {
    #[key]
    pub id: i64,
    #[unique]
    pub user_id: String,
    #[json]
    pub roles: Vec<i64>,
}
