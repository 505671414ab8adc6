//! Dependent-record storage: appointments and clinical records.

use carebase_clinical::{
    Appointment, AppointmentPatch, ClinicalRecord, RecordPatch,
};
use carebase_core::{AppointmentId, ClinicianId, PatientId, RecordId};

use crate::error::StoreResult;

/// Visibility scope for appointment listings.
///
/// Clinicians and patients see their own appointments; administrative roles
/// see everything.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppointmentScope {
    All,
    ForClinician(ClinicianId),
    ForPatient(PatientId),
}

/// Visibility scope for clinical-record listings.
///
/// A clinician's listing is pinned to their own records, optionally narrowed
/// to one patient.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordScope {
    All,
    ForClinician {
        clinician_id: ClinicianId,
        patient_id: Option<PatientId>,
    },
}

/// Dependent-record store contract.
///
/// Same ground rules as the directory: lookups and listings exclude
/// logically-deleted rows, every mutating call is one transaction, and
/// deletion flags only ever move false to true.
pub trait RecordsStore: Send + Sync {
    // ── Appointments ─────────────────────────────────────────────────────

    fn insert_appointment(&self, appointment: Appointment) -> StoreResult<()>;
    fn appointment(&self, id: AppointmentId) -> StoreResult<Option<Appointment>>;
    fn appointments(&self, scope: AppointmentScope) -> StoreResult<Vec<Appointment>>;

    /// Apply a partial update to a live appointment.
    fn update_appointment(
        &self,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> StoreResult<Appointment>;

    /// Mark an appointment deleted. A missing row is `NotFound`; an
    /// already-deleted one is a success.
    fn soft_delete_appointment(&self, id: AppointmentId) -> StoreResult<()>;

    fn count_appointments(&self) -> StoreResult<usize>;

    // ── Clinical records ─────────────────────────────────────────────────

    fn insert_record(&self, record: ClinicalRecord) -> StoreResult<()>;
    fn record(&self, id: RecordId) -> StoreResult<Option<ClinicalRecord>>;
    fn records(&self, scope: RecordScope) -> StoreResult<Vec<ClinicalRecord>>;

    /// Apply a partial update to a live clinical record.
    fn update_record(&self, id: RecordId, patch: RecordPatch) -> StoreResult<ClinicalRecord>;

    /// Mark a clinical record deleted. A missing row is `NotFound`; an
    /// already-deleted one is a success.
    fn soft_delete_record(&self, id: RecordId) -> StoreResult<()>;

    fn count_records(&self) -> StoreResult<usize>;
}
