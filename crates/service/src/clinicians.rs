//! Clinician directory operations.
//!
//! Creating a clinician provisions an account alongside the profile;
//! deleting one cascades the tombstone to that account.

use serde::{Deserialize, Serialize};

use carebase_auth::{Permission, RoleName};
use carebase_clinical::{ClinicianDraft, ClinicianPatch, ClinicianProfile, ProfileDraft};
use carebase_core::ClinicianId;
use carebase_store::{ProfileRow, StoreError};

use crate::accounts::provision_account;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClinicianRequest {
    pub email: String,
    pub password: String,
    pub profile: ClinicianDraft,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClinicianDetail {
    pub profile: ClinicianProfile,
    /// Login email of the owning account; absent when that account has been
    /// tombstoned without the profile (the cascade is one-directional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub fn list(ctx: &AppContext, token: &str) -> Result<Vec<ClinicianProfile>, ApiError> {
    ctx.authorize(token, &Permission::CLINICIAN_VIEW)?;
    Ok(ctx.store().clinicians()?)
}

pub fn get(ctx: &AppContext, token: &str, id: ClinicianId) -> Result<ClinicianDetail, ApiError> {
    ctx.authorize(token, &Permission::CLINICIAN_VIEW)?;

    let profile = ctx
        .store()
        .clinician(id)?
        .ok_or_else(|| ApiError::not_found("clinician not found"))?;
    let email = ctx
        .store()
        .account(profile.account_id)?
        .map(|account| account.email.to_string());

    Ok(ClinicianDetail { profile, email })
}

pub fn create(
    ctx: &AppContext,
    token: &str,
    req: CreateClinicianRequest,
) -> Result<ClinicianDetail, ApiError> {
    ctx.authorize(token, &Permission::CLINICIAN_CREATE)?;

    let graph = provision_account(
        ctx,
        &req.email,
        &req.password,
        RoleName::Clinician,
        Some(ProfileDraft::Clinician(req.profile)),
    )?;

    match graph.profile {
        Some(ProfileRow::Clinician(profile)) => Ok(ClinicianDetail {
            profile,
            email: Some(graph.account.email.to_string()),
        }),
        _ => Err(ApiError::unavailable("clinician profile missing after provisioning")),
    }
}

pub fn update(
    ctx: &AppContext,
    token: &str,
    id: ClinicianId,
    patch: ClinicianPatch,
) -> Result<ClinicianProfile, ApiError> {
    ctx.authorize(token, &Permission::CLINICIAN_EDIT)?;

    ctx.store().update_clinician(id, patch).map_err(|err| match err {
        StoreError::NotFound => ApiError::not_found("clinician not found"),
        other => other.into(),
    })
}

pub fn delete(ctx: &AppContext, token: &str, id: ClinicianId) -> Result<(), ApiError> {
    ctx.authorize(token, &Permission::CLINICIAN_DELETE)?;

    if ctx.store().clinician(id)?.is_none() {
        return Err(ApiError::not_found("clinician not found"));
    }
    ctx.coordinator().delete_clinician(id)?;

    tracing::info!(clinician_id = %id, "clinician deleted, account tombstoned with it");
    Ok(())
}
