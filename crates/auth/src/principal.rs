use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use carebase_core::{AccountId, ClinicianId, PatientId};

use crate::{Permission, RoleName};

/// Link from a principal to its role-specific profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileRef {
    Clinician(ClinicianId),
    Patient(PatientId),
}

/// The resolved, trusted representation of a caller.
///
/// Built by the identity resolver from the live account graph on every
/// request: the permission set is re-materialized from the role's grants,
/// never embedded in the token, so grant edits take effect on the caller's
/// next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub account_id: AccountId,
    pub email: String,
    pub role: RoleName,

    /// Explicit superuser capability carried by the role row. Evaluated
    /// inside `admit`; call sites never compare role names.
    pub has_all_permissions: bool,

    /// Materialized permission set reachable through the role's grants.
    pub permissions: HashSet<Permission>,

    /// Role-specific profile, when the role requires one.
    pub profile: Option<ProfileRef>,
}

impl Principal {
    pub fn has_permission(&self, required: &Permission) -> bool {
        self.has_all_permissions || self.permissions.contains(required)
    }

    /// Clinician profile id, when the caller is a clinician.
    pub fn clinician_id(&self) -> Option<ClinicianId> {
        match self.profile {
            Some(ProfileRef::Clinician(id)) => Some(id),
            _ => None,
        }
    }

    /// Patient profile id, when the caller is a patient.
    pub fn patient_id(&self) -> Option<PatientId> {
        match self.profile {
            Some(ProfileRef::Patient(id)) => Some(id),
            _ => None,
        }
    }
}
