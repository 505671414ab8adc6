use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carebase_core::{ClinicianId, DomainError, DomainResult, Entity, PatientId, RecordId, SoftDelete};

/// A clinical record of one visit: diagnosis, treatment, optional notes.
///
/// Like appointments, records reference one clinician and one patient
/// profile and survive their tombstoning untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub id: RecordId,
    pub clinician_id: ClinicianId,
    pub patient_id: PatientId,
    pub visit_date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: Option<String>,
    pub is_deleted: bool,
}

impl ClinicalRecord {
    pub fn new(draft: RecordDraft) -> Self {
        Self {
            id: RecordId::new(),
            clinician_id: draft.clinician_id,
            patient_id: draft.patient_id,
            visit_date: draft.visit_date,
            diagnosis: draft.diagnosis,
            treatment: draft.treatment,
            notes: draft.notes,
            is_deleted: false,
        }
    }

    /// Apply a partial update; only supplied fields mutate.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(clinician_id) = patch.clinician_id {
            self.clinician_id = clinician_id;
        }
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(visit_date) = patch.visit_date {
            self.visit_date = visit_date;
        }
        if let Some(diagnosis) = patch.diagnosis {
            self.diagnosis = diagnosis;
        }
        if let Some(treatment) = patch.treatment {
            self.treatment = treatment;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }
}

impl Entity for ClinicalRecord {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for ClinicalRecord {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

/// Fields required to create a clinical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub clinician_id: ClinicianId,
    pub patient_id: PatientId,
    pub visit_date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: Option<String>,
}

impl RecordDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.diagnosis.trim().is_empty() {
            return Err(DomainError::validation("diagnosis cannot be empty"));
        }
        if self.treatment.trim().is_empty() {
            return Err(DomainError::validation("treatment cannot be empty"));
        }
        Ok(())
    }
}

/// Partial update for a clinical record. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub clinician_id: Option<ClinicianId>,
    pub patient_id: Option<PatientId>,
    pub visit_date: Option<DateTime<Utc>>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecordDraft {
        RecordDraft {
            clinician_id: ClinicianId::new(),
            patient_id: PatientId::new(),
            visit_date: Utc::now(),
            diagnosis: "hypertension".into(),
            treatment: "lifestyle changes".into(),
            notes: None,
        }
    }

    #[test]
    fn draft_requires_diagnosis_and_treatment() {
        let mut d = draft();
        d.diagnosis = String::new();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.treatment = " ".into();
        assert!(d.validate().is_err());

        assert!(draft().validate().is_ok());
    }

    #[test]
    fn patch_can_add_notes_later() {
        let mut record = ClinicalRecord::new(draft());
        assert!(record.notes.is_none());

        record.apply(RecordPatch {
            notes: Some("follow up in two weeks".into()),
            ..Default::default()
        });

        assert_eq!(record.notes.as_deref(), Some("follow up in two weeks"));
        assert_eq!(record.diagnosis, "hypertension");
    }
}
