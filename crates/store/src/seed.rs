//! Idempotent role/permission/grant seeding.
//!
//! Writes the fixed catalog into the store once at startup; rerunning
//! changes nothing. After seeding, the stored rows are the request-time
//! source of truth and can be edited by an administrator without a
//! redeploy.

use carebase_auth::{Permission, RoleName, grants_of};
use carebase_clinical::{PermissionRecord, Role};

use crate::directory::DirectoryStore;
use crate::error::StoreResult;

pub fn seed_catalog<S: DirectoryStore + ?Sized>(store: &S) -> StoreResult<()> {
    // The whole universe gets a permission row, granted or not.
    for code in Permission::universe() {
        store.upsert_permission(PermissionRecord::new(code.clone()))?;
    }

    for name in RoleName::ALL {
        let has_all_permissions = name == RoleName::Administrator;
        let role_id = store.upsert_role(Role::new(name, has_all_permissions))?;

        for code in grants_of(name) {
            let permission_id = store.upsert_permission(PermissionRecord::new(code.clone()))?;
            store.ensure_grant(role_id, permission_id)?;
        }
    }

    Ok(())
}
