//! Clinical-record operations.
//!
//! A clinician's listing is pinned to their own records, optionally narrowed
//! to one patient; administrative roles list everything.

use carebase_auth::Permission;
use carebase_clinical::{ClinicalRecord, RecordDraft, RecordPatch};
use carebase_core::{PatientId, RecordId};
use carebase_store::{RecordScope, StoreError};

use crate::context::AppContext;
use crate::error::ApiError;

pub fn list(
    ctx: &AppContext,
    token: &str,
    patient_filter: Option<PatientId>,
) -> Result<Vec<ClinicalRecord>, ApiError> {
    let principal = ctx.authorize(token, &Permission::RECORD_VIEW)?;

    let scope = match principal.clinician_id() {
        Some(clinician_id) => RecordScope::ForClinician {
            clinician_id,
            patient_id: patient_filter,
        },
        None => RecordScope::All,
    };

    Ok(ctx.store().records(scope)?)
}

pub fn get(ctx: &AppContext, token: &str, id: RecordId) -> Result<ClinicalRecord, ApiError> {
    ctx.authorize(token, &Permission::RECORD_VIEW)?;

    ctx.store()
        .record(id)?
        .ok_or_else(|| ApiError::not_found("clinical record not found"))
}

pub fn create(ctx: &AppContext, token: &str, draft: RecordDraft) -> Result<ClinicalRecord, ApiError> {
    ctx.authorize(token, &Permission::RECORD_CREATE)?;

    draft.validate()?;
    if ctx.store().clinician(draft.clinician_id)?.is_none() {
        return Err(ApiError::not_found("clinician not found"));
    }
    if ctx.store().patient(draft.patient_id)?.is_none() {
        return Err(ApiError::not_found("patient not found"));
    }

    let record = ClinicalRecord::new(draft);
    ctx.store().insert_record(record.clone())?;

    tracing::info!(record_id = %record.id, "clinical record created");
    Ok(record)
}

pub fn update(
    ctx: &AppContext,
    token: &str,
    id: RecordId,
    patch: RecordPatch,
) -> Result<ClinicalRecord, ApiError> {
    ctx.authorize(token, &Permission::RECORD_EDIT)?;

    ctx.store().update_record(id, patch).map_err(|err| match err {
        StoreError::NotFound => ApiError::not_found("clinical record not found"),
        other => other.into(),
    })
}

pub fn delete(ctx: &AppContext, token: &str, id: RecordId) -> Result<(), ApiError> {
    ctx.authorize(token, &Permission::RECORD_DELETE)?;

    if ctx.store().record(id)?.is_none() {
        return Err(ApiError::not_found("clinical record not found"));
    }
    ctx.coordinator().delete_record(id)?;
    Ok(())
}
