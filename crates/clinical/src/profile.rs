//! Clinician and patient profiles.
//!
//! Exactly one profile exists per account when the account's role requires
//! one. A profile's deletion flag is independent of, but coupled to, the
//! owning account's: deleting a profile tombstones the account too (the
//! coordinator owns that cascade), while deleting an account leaves the
//! profile untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use carebase_core::{AccountId, ClinicianId, DomainError, DomainResult, Entity, PatientId, SoftDelete};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Role-specific attributes of a clinician account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicianProfile {
    pub id: ClinicianId,
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub contact_number: String,
    pub is_deleted: bool,
}

impl ClinicianProfile {
    pub fn new(account_id: AccountId, draft: ClinicianDraft) -> Self {
        Self {
            id: ClinicianId::new(),
            account_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            specialty: draft.specialty,
            contact_number: draft.contact_number,
            is_deleted: false,
        }
    }

    /// Apply a partial update; only supplied fields mutate.
    pub fn apply(&mut self, patch: ClinicianPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(specialty) = patch.specialty {
            self.specialty = specialty;
        }
        if let Some(contact_number) = patch.contact_number {
            self.contact_number = contact_number;
        }
    }
}

impl Entity for ClinicianProfile {
    type Id = ClinicianId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for ClinicianProfile {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

/// Role-specific attributes of a patient account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: PatientId,
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact_number: String,
    pub is_deleted: bool,
}

impl PatientProfile {
    pub fn new(account_id: AccountId, draft: PatientDraft) -> Self {
        Self {
            id: PatientId::new(),
            account_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            date_of_birth: draft.date_of_birth,
            gender: draft.gender,
            contact_number: draft.contact_number,
            is_deleted: false,
        }
    }

    /// Apply a partial update; only supplied fields mutate.
    pub fn apply(&mut self, patch: PatientPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(contact_number) = patch.contact_number {
            self.contact_number = contact_number;
        }
    }
}

impl Entity for PatientProfile {
    type Id = PatientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for PatientProfile {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

/// Fields required to create a clinician profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicianDraft {
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub contact_number: String,
}

impl ClinicianDraft {
    pub fn validate(&self) -> DomainResult<()> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last_name");
        }
        if self.specialty.trim().is_empty() {
            missing.push("specialty");
        }
        if self.contact_number.trim().is_empty() {
            missing.push("contact_number");
        }
        require_none_missing("clinician", missing)
    }
}

/// Fields required to create a patient profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact_number: String,
}

impl PatientDraft {
    pub fn validate(&self) -> DomainResult<()> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last_name");
        }
        if self.contact_number.trim().is_empty() {
            missing.push("contact_number");
        }
        require_none_missing("patient", missing)
    }
}

/// The profile half of a registration, when the role requires one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileDraft {
    Clinician(ClinicianDraft),
    Patient(PatientDraft),
}

/// Partial update for a clinician profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicianPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialty: Option<String>,
    pub contact_number: Option<String>,
}

/// Partial update for a patient profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub contact_number: Option<String>,
}

fn require_none_missing(role: &str, missing: Vec<&str>) -> DomainResult<()> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "missing required fields for role {role}: {}",
            missing.join(", ")
        )))
    }
}
