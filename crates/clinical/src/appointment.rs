use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carebase_core::{AppointmentId, ClinicianId, Entity, PatientId, SoftDelete};

/// A scheduled encounter between one clinician and one patient.
///
/// Appointments reference profiles, never accounts, and are never
/// cascade-deleted when a referenced profile or account is tombstoned: they
/// stay independently addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub clinician_id: ClinicianId,
    pub patient_id: PatientId,
    pub scheduled_at: DateTime<Utc>,
    pub reason: Option<String>,
    pub is_deleted: bool,
}

impl Appointment {
    pub fn new(draft: AppointmentDraft) -> Self {
        Self {
            id: AppointmentId::new(),
            clinician_id: draft.clinician_id,
            patient_id: draft.patient_id,
            scheduled_at: draft.scheduled_at,
            reason: draft.reason,
            is_deleted: false,
        }
    }

    /// Apply a partial update; only supplied fields mutate.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(clinician_id) = patch.clinician_id {
            self.clinician_id = clinician_id;
        }
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            self.scheduled_at = scheduled_at;
        }
        if let Some(reason) = patch.reason {
            self.reason = Some(reason);
        }
    }
}

impl Entity for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for Appointment {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

/// Fields required to create an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub clinician_id: ClinicianId,
    pub patient_id: PatientId,
    pub scheduled_at: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Partial update for an appointment. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPatch {
    pub clinician_id: Option<ClinicianId>,
    pub patient_id: Option<PatientId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
}
