//! Persisted role / permission / grant rows.
//!
//! These are the request-time source of truth for authorization: the
//! identity resolver materializes a principal's permission set from the
//! grants reachable through its role row, so editing these rows changes
//! behavior without a restart. The seed table in `carebase-auth::catalog`
//! only populates them.

use serde::{Deserialize, Serialize};

use carebase_auth::{Permission, RoleName};
use carebase_core::{Entity, PermissionId, RoleId};

/// A named role with its superuser capability.
///
/// `has_all_permissions` is the explicit capability flag evaluated by the
/// authorization gate; no call site compares role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub has_all_permissions: bool,
}

impl Role {
    pub fn new(name: RoleName, has_all_permissions: bool) -> Self {
        Self {
            id: RoleId::new(),
            name,
            has_all_permissions,
        }
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A permission row: one atomic capability code plus a human description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub code: Permission,
    pub description: String,
}

impl PermissionRecord {
    pub fn new(code: Permission) -> Self {
        let description = describe(code.as_str());
        Self {
            id: PermissionId::new(),
            code,
            description,
        }
    }
}

impl Entity for PermissionRecord {
    type Id = PermissionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Join row expressing that a role carries a permission.
///
/// The `(role_id, permission_id)` pair is unique; the store rejects
/// duplicate grants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
}

/// Human description derived from a dotted code: `"record.view"` becomes
/// `"Record view"`.
fn describe(code: &str) -> String {
    let spaced = code.replace('.', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_description_is_derived() {
        let record = PermissionRecord::new(Permission::RECORD_VIEW);
        assert_eq!(record.description, "Record view");
    }

    #[test]
    fn superuser_capability_is_explicit() {
        let admin = Role::new(RoleName::Administrator, true);
        let clinician = Role::new(RoleName::Clinician, false);

        assert!(admin.has_all_permissions);
        assert!(!clinician.has_all_permissions);
    }
}
