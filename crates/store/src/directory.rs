//! Directory storage: accounts, roles, permissions, grants, profiles.

use carebase_auth::{Permission, RoleName};
use carebase_clinical::{
    Account, ClinicianPatch, ClinicianProfile, PatientPatch, PatientProfile, PermissionRecord, Role,
};
use carebase_core::{AccountId, ClinicianId, PatientId, PermissionId, RoleId};

use crate::error::StoreResult;

/// Role-specific profile row accompanying an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileRow {
    Clinician(ClinicianProfile),
    Patient(PatientProfile),
}

/// The hydrated account graph behind a subject.
///
/// Everything the identity resolver needs to build a principal: the account,
/// its role row (with the superuser capability), the permission codes
/// reachable through the role's grants, and the role-specific profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGraph {
    pub account: Account,
    pub role: Role,
    pub permissions: Vec<Permission>,
    pub profile: Option<ProfileRow>,
}

/// A directory entity targeted for logical deletion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tombstone {
    Account(AccountId),
    Clinician(ClinicianId),
    Patient(PatientId),
}

/// Directory store contract.
///
/// Implementations must provide point lookup by unique key, enforce email
/// uniqueness across **all** account rows (deleted included), and apply each
/// mutating call as one transaction. Every lookup and listing excludes
/// logically-deleted rows; that filter is part of the contract, not an
/// option.
pub trait DirectoryStore: Send + Sync {
    // ── Roles / permissions / grants (seed + catalog edits) ──────────────

    /// Insert the role or return the existing row's id (unique by name).
    fn upsert_role(&self, role: Role) -> StoreResult<RoleId>;

    /// Insert the permission or return the existing row's id (unique by code).
    fn upsert_permission(&self, permission: PermissionRecord) -> StoreResult<PermissionId>;

    /// Ensure a `(role, permission)` grant row exists. The pair is unique;
    /// re-granting is a no-op, never an error.
    fn ensure_grant(&self, role_id: RoleId, permission_id: PermissionId) -> StoreResult<()>;

    fn role_by_name(&self, name: RoleName) -> StoreResult<Option<Role>>;

    // ── Accounts ─────────────────────────────────────────────────────────

    /// Insert an account and its optional profile in one transaction.
    ///
    /// Fails with `Conflict` when any account row, live or deleted,
    /// already holds the email. Concurrent registrations of the same email
    /// rely on this: exactly one writer wins.
    fn insert_account(&self, account: Account, profile: Option<ProfileRow>) -> StoreResult<()>;

    /// Live account by id.
    fn account(&self, id: AccountId) -> StoreResult<Option<Account>>;

    /// Live account by email.
    fn account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Hydrate the full account graph for a live subject.
    ///
    /// Bounded-fetch contract: one call yields account + role + grants +
    /// profile, regardless of backend; never a round trip per permission.
    /// Returns `None` for absent *and* for logically-deleted accounts, which
    /// is what invalidates a deleted account's outstanding tokens.
    fn load_principal(&self, email: &str) -> StoreResult<Option<AccountGraph>>;

    // ── Clinician profiles ───────────────────────────────────────────────

    fn clinician(&self, id: ClinicianId) -> StoreResult<Option<ClinicianProfile>>;
    fn clinicians(&self) -> StoreResult<Vec<ClinicianProfile>>;

    /// Apply a partial update to a live clinician profile.
    fn update_clinician(&self, id: ClinicianId, patch: ClinicianPatch)
    -> StoreResult<ClinicianProfile>;

    /// Owning account of a clinician profile, deleted rows included; the
    /// coordinator needs the owner of a row it is about to tombstone.
    fn clinician_owner(&self, id: ClinicianId) -> StoreResult<Option<AccountId>>;

    fn count_clinicians(&self) -> StoreResult<usize>;

    // ── Patient profiles ─────────────────────────────────────────────────

    fn patient(&self, id: PatientId) -> StoreResult<Option<PatientProfile>>;
    fn patients(&self) -> StoreResult<Vec<PatientProfile>>;

    /// Apply a partial update to a live patient profile.
    fn update_patient(&self, id: PatientId, patch: PatientPatch) -> StoreResult<PatientProfile>;

    /// Owning account of a patient profile, deleted rows included.
    fn patient_owner(&self, id: PatientId) -> StoreResult<Option<AccountId>>;

    fn count_patients(&self) -> StoreResult<usize>;

    // ── Logical deletion ─────────────────────────────────────────────────

    /// Atomically mark a batch of directory rows deleted.
    ///
    /// All-or-nothing: if any target row is missing entirely the whole batch
    /// fails with `NotFound` and nothing is flagged. Re-deleting an
    /// already-deleted row is a success; the flag only moves false to true.
    fn mark_deleted(&self, batch: &[Tombstone]) -> StoreResult<()>;
}
