use core::str::FromStr;

use serde::{Deserialize, Serialize};

use carebase_core::DomainError;

/// The closed role set of this domain.
///
/// Roles are a fixed enumeration, not free-form strings: an account always
/// holds exactly one of these, and the seed table in [`crate::catalog`] is
/// keyed by them. The superuser capability is *not* derived from the name;
/// it is an explicit flag on the persisted role row, so no call site ever
/// compares against `Administrator` directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    Administrator,
    Clinician,
    FrontDesk,
    Patient,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::Administrator,
        RoleName::Clinician,
        RoleName::FrontDesk,
        RoleName::Patient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Administrator => "administrator",
            RoleName::Clinician => "clinician",
            RoleName::FrontDesk => "front-desk",
            RoleName::Patient => "patient",
        }
    }

    /// Whether accounts in this role own a clinician profile.
    pub fn requires_clinician_profile(&self) -> bool {
        matches!(self, RoleName::Clinician)
    }

    /// Whether accounts in this role own a patient profile.
    pub fn requires_patient_profile(&self) -> bool {
        matches!(self, RoleName::Patient)
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(RoleName::Administrator),
            "clinician" => Ok(RoleName::Clinician),
            "front-desk" => Ok(RoleName::FrontDesk),
            "patient" => Ok(RoleName::Patient),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
