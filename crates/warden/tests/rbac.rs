//! Permission resolution over the three composed stores.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use warden::models::{Permission, Role, User};
use warden::Rbac;

fn open_rbac(dir: &tempfile::TempDir) -> Rbac {
    Rbac::open(dir.path().join("rbac.db")).unwrap()
}

/// Permissions {1..100}, 10 roles over disjoint 10-permission slices,
/// 5 users with 2 roles each.
fn seed(rbac: &Rbac) {
    for p in 1..=100 {
        let id = rbac
            .permissions
            .insert(&Permission {
                id: 0,
                name: format!("perm-{p}"),
                description: format!("permission {p}"),
            })
            .unwrap();
        assert_eq!(id, p);
    }

    for r in 0..10i64 {
        let slice: Vec<i64> = (r * 10 + 1..=r * 10 + 10).collect();
        let id = rbac
            .roles
            .insert(&Role {
                id: 0,
                name: format!("role-{r}"),
                description: format!("role {r}"),
                permissions: slice,
            })
            .unwrap();
        assert_eq!(id, r + 1);
    }

    for u in 0..5i64 {
        rbac.users
            .insert(&User {
                id: 0,
                user_id: format!("user-{u}"),
                roles: vec![u * 2 + 1, u * 2 + 2],
            })
            .unwrap();
    }
}

fn owned_permissions(u: i64) -> HashSet<i64> {
    (u * 20 + 1..=u * 20 + 20).collect()
}

#[test]
fn has_permission_matches_owned_slices_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let rbac = open_rbac(&dir);
    seed(&rbac);

    for u in 0..5i64 {
        let user_id = format!("user-{u}");
        let owned = owned_permissions(u);
        for p in 1..=100 {
            assert_eq!(
                rbac.has_permission(&user_id, p).unwrap(),
                owned.contains(&p),
                "user {user_id}, permission {p}"
            );
        }
    }
}

#[test]
fn user_permissions_resolves_the_full_owned_set() {
    let dir = tempfile::tempdir().unwrap();
    let rbac = open_rbac(&dir);
    seed(&rbac);

    for u in 0..5i64 {
        let resolved = rbac.user_permissions(&format!("user-{u}")).unwrap();
        assert_eq!(resolved.len(), 20);

        let ids: HashSet<i64> = resolved.iter().map(|p| p.id).collect();
        assert_eq!(ids, owned_permissions(u));

        for permission in &resolved {
            assert_eq!(permission.name, format!("perm-{}", permission.id));
        }
    }
}

#[test]
fn unknown_user_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let rbac = open_rbac(&dir);
    seed(&rbac);

    let err = rbac.has_permission("nobody", 1).unwrap_err();
    assert!(err.is_record_not_found());
    let err = rbac.user_permissions("nobody").unwrap_err();
    assert!(err.is_record_not_found());
}

#[test]
fn duplicate_user_id_is_rejected_by_the_unique_index() {
    let dir = tempfile::tempdir().unwrap();
    let rbac = open_rbac(&dir);

    rbac.users
        .insert(&User {
            id: 0,
            user_id: "alice".into(),
            roles: vec![1],
        })
        .unwrap();

    let err = rbac
        .users
        .insert(&User {
            id: 0,
            user_id: "alice".into(),
            roles: vec![2],
        })
        .unwrap_err();
    assert!(err.is_driver());
    assert_eq!(rbac.users.get_all().unwrap().len(), 1);
}

#[test]
fn user_with_no_roles_has_no_permissions() {
    let dir = tempfile::tempdir().unwrap();
    let rbac = open_rbac(&dir);
    seed(&rbac);

    rbac.users
        .insert(&User {
            id: 0,
            user_id: "roleless".into(),
            roles: vec![],
        })
        .unwrap();

    assert!(!rbac.has_permission("roleless", 1).unwrap());
    assert!(rbac.user_permissions("roleless").unwrap().is_empty());
}

#[test]
fn overlapping_roles_union_their_permissions() {
    let dir = tempfile::tempdir().unwrap();
    let rbac = open_rbac(&dir);

    for p in 1..=3 {
        rbac.permissions
            .insert(&Permission {
                id: 0,
                name: format!("perm-{p}"),
                description: String::new(),
            })
            .unwrap();
    }
    let reader = rbac
        .roles
        .insert(&Role {
            id: 0,
            name: "reader".into(),
            description: String::new(),
            permissions: vec![1, 2],
        })
        .unwrap();
    let writer = rbac
        .roles
        .insert(&Role {
            id: 0,
            name: "writer".into(),
            description: String::new(),
            permissions: vec![2, 3],
        })
        .unwrap();
    rbac.users
        .insert(&User {
            id: 0,
            user_id: "both".into(),
            roles: vec![reader, writer],
        })
        .unwrap();

    let ids: HashSet<i64> = rbac
        .user_permissions("both")
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, HashSet::from([1, 2, 3]));
}
