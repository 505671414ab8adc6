use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are atomic capability codes modeled as opaque dotted strings
/// (e.g. `"record.view"`). The closed universe below is data consumed by the
/// seed path; the authorization gate never matches on a specific code, so
/// extending the universe never touches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const ACCOUNT_CREATE: Permission = Permission::from_static("account.create");
    pub const ACCOUNT_VIEW: Permission = Permission::from_static("account.view");
    pub const ACCOUNT_EDIT: Permission = Permission::from_static("account.edit");
    pub const ACCOUNT_DELETE: Permission = Permission::from_static("account.delete");

    pub const CLINICIAN_CREATE: Permission = Permission::from_static("clinician.create");
    pub const CLINICIAN_VIEW: Permission = Permission::from_static("clinician.view");
    pub const CLINICIAN_EDIT: Permission = Permission::from_static("clinician.edit");
    pub const CLINICIAN_DELETE: Permission = Permission::from_static("clinician.delete");

    pub const PATIENT_CREATE: Permission = Permission::from_static("patient.create");
    pub const PATIENT_VIEW: Permission = Permission::from_static("patient.view");
    pub const PATIENT_EDIT: Permission = Permission::from_static("patient.edit");
    pub const PATIENT_DELETE: Permission = Permission::from_static("patient.delete");

    pub const APPOINTMENT_CREATE: Permission = Permission::from_static("appointment.create");
    pub const APPOINTMENT_VIEW: Permission = Permission::from_static("appointment.view");
    pub const APPOINTMENT_EDIT: Permission = Permission::from_static("appointment.edit");
    pub const APPOINTMENT_DELETE: Permission = Permission::from_static("appointment.delete");

    pub const RECORD_CREATE: Permission = Permission::from_static("record.create");
    pub const RECORD_VIEW: Permission = Permission::from_static("record.view");
    pub const RECORD_EDIT: Permission = Permission::from_static("record.edit");
    pub const RECORD_DELETE: Permission = Permission::from_static("record.delete");

    pub const DASHBOARD_VIEW: Permission = Permission::from_static("dashboard.view");

    const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Construct a permission from a runtime string (store round trips).
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full permission universe, in seed order.
    pub fn universe() -> &'static [Permission] {
        &UNIVERSE
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

static UNIVERSE: [Permission; 21] = [
    Permission::ACCOUNT_CREATE,
    Permission::ACCOUNT_VIEW,
    Permission::ACCOUNT_EDIT,
    Permission::ACCOUNT_DELETE,
    Permission::CLINICIAN_CREATE,
    Permission::CLINICIAN_VIEW,
    Permission::CLINICIAN_EDIT,
    Permission::CLINICIAN_DELETE,
    Permission::PATIENT_CREATE,
    Permission::PATIENT_VIEW,
    Permission::PATIENT_EDIT,
    Permission::PATIENT_DELETE,
    Permission::APPOINTMENT_CREATE,
    Permission::APPOINTMENT_VIEW,
    Permission::APPOINTMENT_EDIT,
    Permission::APPOINTMENT_DELETE,
    Permission::RECORD_CREATE,
    Permission::RECORD_VIEW,
    Permission::RECORD_EDIT,
    Permission::RECORD_DELETE,
    Permission::DASHBOARD_VIEW,
];
