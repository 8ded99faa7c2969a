use crate::models::{Permission, Role, User};

use std::path::Path;
use warden_store::{Error, Result, Store};

/// The access-control query layer.
///
/// Composes the permission, role, and user stores and resolves
/// user → roles → permissions on every call. Any store failure propagates
/// immediately, wrapped with the failing lookup's context; there are no
/// partial results.
pub struct Rbac {
    pub permissions: Store<Permission>,
    pub roles: Store<Role>,
    pub users: Store<User>,
}

impl Rbac {
    /// Opens the three stores over one database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Rbac {
            permissions: Store::open(path)?,
            roles: Store::open(path)?,
            users: Store::open(path)?,
        })
    }

    /// Builds the layer from pre-opened stores.
    pub fn new(permissions: Store<Permission>, roles: Store<Role>, users: Store<User>) -> Self {
        Rbac {
            permissions,
            roles,
            users,
        }
    }

    /// Returns `true` if any of the user's roles grants `permission`.
    pub fn has_permission(&self, user_id: &str, permission: i64) -> Result<bool> {
        let user = self.lookup_user(user_id)?;
        let roles = self.lookup_roles(&user)?;
        Ok(roles
            .iter()
            .any(|role| role.permissions.contains(&permission)))
    }

    /// Resolves the full permission set granted to the user through all of
    /// their roles.
    pub fn user_permissions(&self, user_id: &str) -> Result<Vec<Permission>> {
        let user = self.lookup_user(user_id)?;
        let roles = self.lookup_roles(&user)?;

        let mut ids: Vec<i64> = roles
            .iter()
            .flat_map(|role| role.permissions.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        self.permissions
            .get_multi(&ids)
            .map_err(|err| err.context("permission lookup failed"))
    }

    /// Looks the user up by the unique `user_id` field; anything other
    /// than exactly one match is the not-found error.
    fn lookup_user(&self, user_id: &str) -> Result<User> {
        let mut users = self
            .users
            .find_by("user_id", user_id)
            .map_err(|err| err.context("user lookup failed"))?;
        match users.pop() {
            Some(user) if users.is_empty() => Ok(user),
            _ => Err(Error::record_not_found().context(format!("user `{user_id}`"))),
        }
    }

    fn lookup_roles(&self, user: &User) -> Result<Vec<Role>> {
        self.roles
            .get_multi(&user.roles)
            .map_err(|err| err.context("role lookup failed"))
    }
}
