//! Soft-delete coordinator: cascade policy over atomic store primitives.
//!
//! The cascade rules live here, not in the store: a store applies a batch of
//! tombstones atomically and knows nothing about *why* the batch has the
//! shape it has.
//!
//! The rules are deliberately asymmetric, reproducing observed product
//! behavior:
//! - deleting a clinician or patient profile also tombstones the owning
//!   account, as one atomic batch;
//! - deleting an account leaves its profile untouched;
//! - dependent records (appointments, clinical records) are never
//!   cascade-deleted; they stay independently addressable.

use std::sync::Arc;

use carebase_core::{AccountId, AppointmentId, ClinicianId, PatientId, RecordId};

use crate::Store;
use crate::directory::Tombstone;
use crate::error::{StoreError, StoreResult};

pub struct SoftDeleteCoordinator {
    store: Arc<dyn Store>,
}

impl SoftDeleteCoordinator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Tombstone an account. No cascade.
    pub fn delete_account(&self, id: AccountId) -> StoreResult<()> {
        self.store.mark_deleted(&[Tombstone::Account(id)])
    }

    /// Tombstone a clinician profile and its owning account together.
    pub fn delete_clinician(&self, id: ClinicianId) -> StoreResult<()> {
        let account_id = self
            .store
            .clinician_owner(id)?
            .ok_or(StoreError::NotFound)?;

        self.store
            .mark_deleted(&[Tombstone::Clinician(id), Tombstone::Account(account_id)])
    }

    /// Tombstone a patient profile and its owning account together.
    pub fn delete_patient(&self, id: PatientId) -> StoreResult<()> {
        let account_id = self.store.patient_owner(id)?.ok_or(StoreError::NotFound)?;

        self.store
            .mark_deleted(&[Tombstone::Patient(id), Tombstone::Account(account_id)])
    }

    /// Tombstone an appointment. No cascade.
    pub fn delete_appointment(&self, id: AppointmentId) -> StoreResult<()> {
        self.store.soft_delete_appointment(id)
    }

    /// Tombstone a clinical record. No cascade.
    pub fn delete_record(&self, id: RecordId) -> StoreResult<()> {
        self.store.soft_delete_record(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DirectoryStore, ProfileRow};
    use crate::memory::InMemoryStore;
    use carebase_auth::RoleName;
    use carebase_clinical::{Account, ClinicianDraft, ClinicianProfile, Role};
    use carebase_core::EmailAddress;

    fn store_with_clinician() -> (Arc<InMemoryStore>, ClinicianId, AccountId) {
        let store = Arc::new(InMemoryStore::new());
        let role_id = store
            .upsert_role(Role::new(RoleName::Clinician, false))
            .unwrap();

        let account = Account::new(
            EmailAddress::parse("dana@clinic.example").unwrap(),
            "hash".into(),
            role_id,
        );
        let account_id = account.id;
        let profile = ClinicianProfile::new(
            account_id,
            ClinicianDraft {
                first_name: "Dana".into(),
                last_name: "Reyes".into(),
                specialty: "Cardiology".into(),
                contact_number: "555-0101".into(),
            },
        );
        let clinician_id = profile.id;
        store
            .insert_account(account, Some(ProfileRow::Clinician(profile)))
            .unwrap();

        (store, clinician_id, account_id)
    }

    #[test]
    fn profile_deletion_cascades_to_account() {
        let (store, clinician_id, _) = store_with_clinician();
        let coordinator = SoftDeleteCoordinator::new(store.clone());

        coordinator.delete_clinician(clinician_id).unwrap();

        assert!(store.clinician(clinician_id).unwrap().is_none());
        assert!(
            store
                .account_by_email("dana@clinic.example")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn account_deletion_does_not_cascade_to_profile() {
        let (store, clinician_id, account_id) = store_with_clinician();
        let coordinator = SoftDeleteCoordinator::new(store.clone());

        coordinator.delete_account(account_id).unwrap();

        assert!(
            store
                .account_by_email("dana@clinic.example")
                .unwrap()
                .is_none()
        );
        // The profile stays live: the cascade is one-directional.
        assert!(store.clinician(clinician_id).unwrap().is_some());
    }

    #[test]
    fn double_delete_reports_success() {
        let (store, clinician_id, _) = store_with_clinician();
        let coordinator = SoftDeleteCoordinator::new(store);

        coordinator.delete_clinician(clinician_id).unwrap();
        coordinator.delete_clinician(clinician_id).unwrap();
    }

    #[test]
    fn deleting_a_missing_profile_is_not_found() {
        let (store, _, _) = store_with_clinician();
        let coordinator = SoftDeleteCoordinator::new(store);

        assert_eq!(
            coordinator.delete_clinician(ClinicianId::new()),
            Err(StoreError::NotFound)
        );
    }
}
