//! `carebase-clinical` — domain entities of the records backend.
//!
//! Accounts, role/permission/grant rows, clinician and patient profiles, and
//! the dependent records (appointments, clinical records). Every entity
//! carries a logical-deletion flag; nothing here knows how rows are stored.

pub mod account;
pub mod appointment;
pub mod profile;
pub mod rbac;
pub mod record;

pub use account::Account;
pub use appointment::{Appointment, AppointmentDraft, AppointmentPatch};
pub use profile::{
    ClinicianDraft, ClinicianPatch, ClinicianProfile, Gender, PatientDraft, PatientPatch,
    PatientProfile, ProfileDraft,
};
pub use rbac::{PermissionRecord, Role, RoleGrant};
pub use record::{ClinicalRecord, RecordDraft, RecordPatch};
