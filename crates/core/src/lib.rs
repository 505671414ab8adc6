//! `carebase-core` — domain foundation building blocks.
//!
//! Pure domain primitives shared by every other crate: the error taxonomy,
//! strongly-typed identifiers, entity/soft-delete contracts, and the email
//! value object. No storage or transport concerns live here.

pub mod email;
pub mod entity;
pub mod error;
pub mod id;

pub use email::EmailAddress;
pub use entity::{Entity, SoftDelete};
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, AppointmentId, ClinicianId, PatientId, PermissionId, RecordId, RoleId};
