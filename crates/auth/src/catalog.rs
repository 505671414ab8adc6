//! Role-to-permission seed table.
//!
//! This fixed table exists to (re)populate the persisted role/permission/
//! grant rows at startup. It is *not* consulted at request time: the
//! authoritative permission set for a principal is materialized from the
//! stored grants, which an administrator can edit without a redeploy.

use crate::{Permission, RoleName};

const CLINICIAN_GRANTS: &[Permission] = &[
    Permission::APPOINTMENT_VIEW,
    Permission::RECORD_CREATE,
    Permission::RECORD_EDIT,
    Permission::RECORD_VIEW,
    Permission::RECORD_DELETE,
    Permission::PATIENT_VIEW,
];

const FRONT_DESK_GRANTS: &[Permission] = &[
    Permission::APPOINTMENT_CREATE,
    Permission::APPOINTMENT_VIEW,
    Permission::APPOINTMENT_EDIT,
    Permission::APPOINTMENT_DELETE,
    Permission::PATIENT_VIEW,
];

const PATIENT_GRANTS: &[Permission] = &[
    Permission::APPOINTMENT_VIEW,
    Permission::PATIENT_VIEW,
];

/// Seed grants of a role.
///
/// The administrator's row also carries the superuser capability, so its
/// materialized grants are the whole universe; `dashboard.view` is granted
/// to no other role and is therefore reachable only through that capability.
pub fn grants_of(role: RoleName) -> &'static [Permission] {
    match role {
        RoleName::Administrator => Permission::universe(),
        RoleName::Clinician => CLINICIAN_GRANTS,
        RoleName::FrontDesk => FRONT_DESK_GRANTS,
        RoleName::Patient => PATIENT_GRANTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grant_is_in_the_universe() {
        for role in RoleName::ALL {
            for permission in grants_of(role) {
                assert!(
                    Permission::universe().contains(permission),
                    "{role}: {permission} not in universe"
                );
            }
        }
    }

    #[test]
    fn clinician_manages_records_not_staff() {
        let grants = grants_of(RoleName::Clinician);
        assert!(grants.contains(&Permission::RECORD_DELETE));
        assert!(!grants.contains(&Permission::CLINICIAN_VIEW));
        assert!(!grants.contains(&Permission::PATIENT_DELETE));
    }

    #[test]
    fn front_desk_manages_appointments() {
        let grants = grants_of(RoleName::FrontDesk);
        assert!(grants.contains(&Permission::APPOINTMENT_DELETE));
        assert!(!grants.contains(&Permission::RECORD_VIEW));
    }

    #[test]
    fn dashboard_is_granted_to_no_seed_role_directly() {
        for role in [RoleName::Clinician, RoleName::FrontDesk, RoleName::Patient] {
            assert!(!grants_of(role).contains(&Permission::DASHBOARD_VIEW));
        }
    }
}
