//! In-memory store for tests/dev.
//!
//! One `RwLock` over all tables: every mutating call takes the write lock
//! once, which is this implementation's transaction boundary: a batch
//! either lands entirely or not at all, and readers never observe a partial
//! write. Not optimized for performance.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use carebase_auth::{Permission, RoleName};
use carebase_clinical::{
    Account, Appointment, AppointmentPatch, ClinicalRecord, ClinicianPatch, ClinicianProfile,
    PatientPatch, PatientProfile, PermissionRecord, RecordPatch, Role, RoleGrant,
};
use carebase_core::{
    AccountId, AppointmentId, ClinicianId, PatientId, PermissionId, RecordId, RoleId, SoftDelete,
};

use crate::directory::{AccountGraph, DirectoryStore, ProfileRow, Tombstone};
use crate::error::{StoreError, StoreResult};
use crate::records::{AppointmentScope, RecordScope, RecordsStore};

#[derive(Debug, Default)]
struct Tables {
    roles: HashMap<RoleId, Role>,
    roles_by_name: HashMap<RoleName, RoleId>,

    permissions: HashMap<PermissionId, PermissionRecord>,
    permissions_by_code: HashMap<String, PermissionId>,

    grants: HashSet<RoleGrant>,

    accounts: HashMap<AccountId, Account>,
    accounts_by_email: HashMap<String, AccountId>,

    clinicians: HashMap<ClinicianId, ClinicianProfile>,
    clinician_by_account: HashMap<AccountId, ClinicianId>,

    patients: HashMap<PatientId, PatientProfile>,
    patient_by_account: HashMap<AccountId, PatientId>,

    appointments: HashMap<AppointmentId, Appointment>,
    records: HashMap<RecordId, ClinicalRecord>,
}

/// In-memory implementation of both store contracts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

impl Tables {
    fn live_account_by_email(&self, email: &str) -> Option<&Account> {
        let id = self.accounts_by_email.get(email)?;
        self.accounts.get(id).filter(|a| !a.is_deleted())
    }

    fn profile_of(&self, account_id: AccountId) -> Option<ProfileRow> {
        if let Some(id) = self.clinician_by_account.get(&account_id) {
            return self
                .clinicians
                .get(id)
                .filter(|p| !p.is_deleted())
                .cloned()
                .map(ProfileRow::Clinician);
        }
        if let Some(id) = self.patient_by_account.get(&account_id) {
            return self
                .patients
                .get(id)
                .filter(|p| !p.is_deleted())
                .cloned()
                .map(ProfileRow::Patient);
        }
        None
    }

    fn tombstone_exists(&self, target: &Tombstone) -> bool {
        match target {
            Tombstone::Account(id) => self.accounts.contains_key(id),
            Tombstone::Clinician(id) => self.clinicians.contains_key(id),
            Tombstone::Patient(id) => self.patients.contains_key(id),
        }
    }

    fn apply_tombstone(&mut self, target: &Tombstone) {
        match target {
            Tombstone::Account(id) => {
                if let Some(account) = self.accounts.get_mut(id) {
                    account.mark_deleted();
                }
            }
            Tombstone::Clinician(id) => {
                if let Some(profile) = self.clinicians.get_mut(id) {
                    profile.mark_deleted();
                }
            }
            Tombstone::Patient(id) => {
                if let Some(profile) = self.patients.get_mut(id) {
                    profile.mark_deleted();
                }
            }
        }
    }
}

impl DirectoryStore for InMemoryStore {
    fn upsert_role(&self, role: Role) -> StoreResult<RoleId> {
        let mut tables = self.write()?;
        if let Some(existing) = tables.roles_by_name.get(&role.name) {
            return Ok(*existing);
        }

        let id = role.id;
        tables.roles_by_name.insert(role.name, id);
        tables.roles.insert(id, role);
        Ok(id)
    }

    fn upsert_permission(&self, permission: PermissionRecord) -> StoreResult<PermissionId> {
        let mut tables = self.write()?;
        if let Some(existing) = tables.permissions_by_code.get(permission.code.as_str()) {
            return Ok(*existing);
        }

        let id = permission.id;
        tables
            .permissions_by_code
            .insert(permission.code.as_str().to_string(), id);
        tables.permissions.insert(id, permission);
        Ok(id)
    }

    fn ensure_grant(&self, role_id: RoleId, permission_id: PermissionId) -> StoreResult<()> {
        let mut tables = self.write()?;
        if !tables.roles.contains_key(&role_id) || !tables.permissions.contains_key(&permission_id)
        {
            return Err(StoreError::NotFound);
        }

        tables.grants.insert(RoleGrant {
            role_id,
            permission_id,
        });
        Ok(())
    }

    fn role_by_name(&self, name: RoleName) -> StoreResult<Option<Role>> {
        let tables = self.read()?;
        Ok(tables
            .roles_by_name
            .get(&name)
            .and_then(|id| tables.roles.get(id))
            .cloned())
    }

    fn insert_account(&self, account: Account, profile: Option<ProfileRow>) -> StoreResult<()> {
        let mut tables = self.write()?;

        let email = account.email.as_str().to_string();
        if tables.accounts_by_email.contains_key(&email) {
            return Err(StoreError::Conflict(format!(
                "email '{email}' already registered"
            )));
        }

        match &profile {
            Some(ProfileRow::Clinician(p)) if p.account_id != account.id => {
                return Err(StoreError::Conflict(
                    "profile does not belong to the account".to_string(),
                ));
            }
            Some(ProfileRow::Patient(p)) if p.account_id != account.id => {
                return Err(StoreError::Conflict(
                    "profile does not belong to the account".to_string(),
                ));
            }
            _ => {}
        }

        let account_id = account.id;
        tables.accounts_by_email.insert(email, account_id);
        tables.accounts.insert(account_id, account);

        match profile {
            Some(ProfileRow::Clinician(p)) => {
                tables.clinician_by_account.insert(account_id, p.id);
                tables.clinicians.insert(p.id, p);
            }
            Some(ProfileRow::Patient(p)) => {
                tables.patient_by_account.insert(account_id, p.id);
                tables.patients.insert(p.id, p);
            }
            None => {}
        }

        Ok(())
    }

    fn account(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let tables = self.read()?;
        Ok(tables.accounts.get(&id).filter(|a| !a.is_deleted()).cloned())
    }

    fn account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let tables = self.read()?;
        Ok(tables.live_account_by_email(email).cloned())
    }

    fn load_principal(&self, email: &str) -> StoreResult<Option<AccountGraph>> {
        let tables = self.read()?;

        let Some(account) = tables.live_account_by_email(email).cloned() else {
            return Ok(None);
        };

        let role = tables
            .roles
            .get(&account.role_id)
            .cloned()
            .ok_or_else(|| StoreError::Unavailable("role row missing".to_string()))?;

        let permissions: Vec<Permission> = tables
            .grants
            .iter()
            .filter(|g| g.role_id == role.id)
            .filter_map(|g| tables.permissions.get(&g.permission_id))
            .map(|p| p.code.clone())
            .collect();

        let profile = tables.profile_of(account.id);

        Ok(Some(AccountGraph {
            account,
            role,
            permissions,
            profile,
        }))
    }

    fn clinician(&self, id: ClinicianId) -> StoreResult<Option<ClinicianProfile>> {
        let tables = self.read()?;
        Ok(tables
            .clinicians
            .get(&id)
            .filter(|p| !p.is_deleted())
            .cloned())
    }

    fn clinicians(&self) -> StoreResult<Vec<ClinicianProfile>> {
        let tables = self.read()?;
        let mut out: Vec<ClinicianProfile> = tables
            .clinicians
            .values()
            .filter(|p| !p.is_deleted())
            .cloned()
            .collect();
        out.sort_by_key(|p| *p.id.as_uuid());
        Ok(out)
    }

    fn update_clinician(
        &self,
        id: ClinicianId,
        patch: ClinicianPatch,
    ) -> StoreResult<ClinicianProfile> {
        let mut tables = self.write()?;
        let profile = tables
            .clinicians
            .get_mut(&id)
            .filter(|p| !p.is_deleted())
            .ok_or(StoreError::NotFound)?;

        profile.apply(patch);
        Ok(profile.clone())
    }

    fn clinician_owner(&self, id: ClinicianId) -> StoreResult<Option<AccountId>> {
        let tables = self.read()?;
        Ok(tables.clinicians.get(&id).map(|p| p.account_id))
    }

    fn count_clinicians(&self) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(tables.clinicians.values().filter(|p| !p.is_deleted()).count())
    }

    fn patient(&self, id: PatientId) -> StoreResult<Option<PatientProfile>> {
        let tables = self.read()?;
        Ok(tables
            .patients
            .get(&id)
            .filter(|p| !p.is_deleted())
            .cloned())
    }

    fn patients(&self) -> StoreResult<Vec<PatientProfile>> {
        let tables = self.read()?;
        let mut out: Vec<PatientProfile> = tables
            .patients
            .values()
            .filter(|p| !p.is_deleted())
            .cloned()
            .collect();
        out.sort_by_key(|p| *p.id.as_uuid());
        Ok(out)
    }

    fn update_patient(&self, id: PatientId, patch: PatientPatch) -> StoreResult<PatientProfile> {
        let mut tables = self.write()?;
        let profile = tables
            .patients
            .get_mut(&id)
            .filter(|p| !p.is_deleted())
            .ok_or(StoreError::NotFound)?;

        profile.apply(patch);
        Ok(profile.clone())
    }

    fn patient_owner(&self, id: PatientId) -> StoreResult<Option<AccountId>> {
        let tables = self.read()?;
        Ok(tables.patients.get(&id).map(|p| p.account_id))
    }

    fn count_patients(&self) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(tables.patients.values().filter(|p| !p.is_deleted()).count())
    }

    fn mark_deleted(&self, batch: &[Tombstone]) -> StoreResult<()> {
        let mut tables = self.write()?;

        // All-or-nothing: verify every target exists before flagging any.
        if !batch.iter().all(|t| tables.tombstone_exists(t)) {
            return Err(StoreError::NotFound);
        }

        for target in batch {
            tables.apply_tombstone(target);
        }
        Ok(())
    }
}

impl RecordsStore for InMemoryStore {
    fn insert_appointment(&self, appointment: Appointment) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.appointments.insert(appointment.id, appointment);
        Ok(())
    }

    fn appointment(&self, id: AppointmentId) -> StoreResult<Option<Appointment>> {
        let tables = self.read()?;
        Ok(tables
            .appointments
            .get(&id)
            .filter(|a| !a.is_deleted())
            .cloned())
    }

    fn appointments(&self, scope: AppointmentScope) -> StoreResult<Vec<Appointment>> {
        let tables = self.read()?;
        let mut out: Vec<Appointment> = tables
            .appointments
            .values()
            .filter(|a| !a.is_deleted())
            .filter(|a| match scope {
                AppointmentScope::All => true,
                AppointmentScope::ForClinician(id) => a.clinician_id == id,
                AppointmentScope::ForPatient(id) => a.patient_id == id,
            })
            .cloned()
            .collect();
        out.sort_by_key(|a| *a.id.as_uuid());
        Ok(out)
    }

    fn update_appointment(
        &self,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> StoreResult<Appointment> {
        let mut tables = self.write()?;
        let appointment = tables
            .appointments
            .get_mut(&id)
            .filter(|a| !a.is_deleted())
            .ok_or(StoreError::NotFound)?;

        appointment.apply(patch);
        Ok(appointment.clone())
    }

    fn soft_delete_appointment(&self, id: AppointmentId) -> StoreResult<()> {
        let mut tables = self.write()?;
        let appointment = tables.appointments.get_mut(&id).ok_or(StoreError::NotFound)?;
        appointment.mark_deleted();
        Ok(())
    }

    fn count_appointments(&self) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(tables
            .appointments
            .values()
            .filter(|a| !a.is_deleted())
            .count())
    }

    fn insert_record(&self, record: ClinicalRecord) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.records.insert(record.id, record);
        Ok(())
    }

    fn record(&self, id: RecordId) -> StoreResult<Option<ClinicalRecord>> {
        let tables = self.read()?;
        Ok(tables.records.get(&id).filter(|r| !r.is_deleted()).cloned())
    }

    fn records(&self, scope: RecordScope) -> StoreResult<Vec<ClinicalRecord>> {
        let tables = self.read()?;
        let mut out: Vec<ClinicalRecord> = tables
            .records
            .values()
            .filter(|r| !r.is_deleted())
            .filter(|r| match scope {
                RecordScope::All => true,
                RecordScope::ForClinician {
                    clinician_id,
                    patient_id,
                } => {
                    r.clinician_id == clinician_id
                        && patient_id.is_none_or(|p| r.patient_id == p)
                }
            })
            .cloned()
            .collect();
        out.sort_by_key(|r| *r.id.as_uuid());
        Ok(out)
    }

    fn update_record(&self, id: RecordId, patch: RecordPatch) -> StoreResult<ClinicalRecord> {
        let mut tables = self.write()?;
        let record = tables
            .records
            .get_mut(&id)
            .filter(|r| !r.is_deleted())
            .ok_or(StoreError::NotFound)?;

        record.apply(patch);
        Ok(record.clone())
    }

    fn soft_delete_record(&self, id: RecordId) -> StoreResult<()> {
        let mut tables = self.write()?;
        let record = tables.records.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.mark_deleted();
        Ok(())
    }

    fn count_records(&self) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(tables.records.values().filter(|r| !r.is_deleted()).count())
    }
}
