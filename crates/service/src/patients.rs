//! Patient directory operations.

use serde::{Deserialize, Serialize};

use carebase_auth::{Permission, RoleName};
use carebase_clinical::{PatientDraft, PatientPatch, PatientProfile, ProfileDraft};
use carebase_core::PatientId;
use carebase_store::{ProfileRow, StoreError};

use crate::accounts::provision_account;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientRequest {
    pub email: String,
    pub password: String,
    pub profile: PatientDraft,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientDetail {
    pub profile: PatientProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub fn list(ctx: &AppContext, token: &str) -> Result<Vec<PatientProfile>, ApiError> {
    ctx.authorize(token, &Permission::PATIENT_VIEW)?;
    Ok(ctx.store().patients()?)
}

pub fn get(ctx: &AppContext, token: &str, id: PatientId) -> Result<PatientDetail, ApiError> {
    ctx.authorize(token, &Permission::PATIENT_VIEW)?;

    let profile = ctx
        .store()
        .patient(id)?
        .ok_or_else(|| ApiError::not_found("patient not found"))?;
    let email = ctx
        .store()
        .account(profile.account_id)?
        .map(|account| account.email.to_string());

    Ok(PatientDetail { profile, email })
}

pub fn create(
    ctx: &AppContext,
    token: &str,
    req: CreatePatientRequest,
) -> Result<PatientDetail, ApiError> {
    ctx.authorize(token, &Permission::PATIENT_CREATE)?;

    let graph = provision_account(
        ctx,
        &req.email,
        &req.password,
        RoleName::Patient,
        Some(ProfileDraft::Patient(req.profile)),
    )?;

    match graph.profile {
        Some(ProfileRow::Patient(profile)) => Ok(PatientDetail {
            profile,
            email: Some(graph.account.email.to_string()),
        }),
        _ => Err(ApiError::unavailable("patient profile missing after provisioning")),
    }
}

pub fn update(
    ctx: &AppContext,
    token: &str,
    id: PatientId,
    patch: PatientPatch,
) -> Result<PatientProfile, ApiError> {
    ctx.authorize(token, &Permission::PATIENT_EDIT)?;

    ctx.store().update_patient(id, patch).map_err(|err| match err {
        StoreError::NotFound => ApiError::not_found("patient not found"),
        other => other.into(),
    })
}

pub fn delete(ctx: &AppContext, token: &str, id: PatientId) -> Result<(), ApiError> {
    ctx.authorize(token, &Permission::PATIENT_DELETE)?;

    if ctx.store().patient(id)?.is_none() {
        return Err(ApiError::not_found("patient not found"));
    }
    ctx.coordinator().delete_patient(id)?;

    tracing::info!(patient_id = %id, "patient deleted, account tombstoned with it");
    Ok(())
}
