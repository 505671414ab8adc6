//! Appointment operations.
//!
//! Listing is scoped by the caller's profile: clinicians and patients see
//! their own appointments, administrative roles see everything.

use carebase_auth::Permission;
use carebase_clinical::{Appointment, AppointmentDraft, AppointmentPatch};
use carebase_core::AppointmentId;
use carebase_store::{AppointmentScope, StoreError};

use crate::context::AppContext;
use crate::error::ApiError;

pub fn list(ctx: &AppContext, token: &str) -> Result<Vec<Appointment>, ApiError> {
    let principal = ctx.authorize(token, &Permission::APPOINTMENT_VIEW)?;

    let scope = if let Some(clinician_id) = principal.clinician_id() {
        AppointmentScope::ForClinician(clinician_id)
    } else if let Some(patient_id) = principal.patient_id() {
        AppointmentScope::ForPatient(patient_id)
    } else {
        AppointmentScope::All
    };

    Ok(ctx.store().appointments(scope)?)
}

pub fn get(ctx: &AppContext, token: &str, id: AppointmentId) -> Result<Appointment, ApiError> {
    ctx.authorize(token, &Permission::APPOINTMENT_VIEW)?;

    ctx.store()
        .appointment(id)?
        .ok_or_else(|| ApiError::not_found("appointment not found"))
}

pub fn create(
    ctx: &AppContext,
    token: &str,
    draft: AppointmentDraft,
) -> Result<Appointment, ApiError> {
    ctx.authorize(token, &Permission::APPOINTMENT_CREATE)?;

    // Both participants must be live rows.
    if ctx.store().clinician(draft.clinician_id)?.is_none() {
        return Err(ApiError::not_found("clinician not found"));
    }
    if ctx.store().patient(draft.patient_id)?.is_none() {
        return Err(ApiError::not_found("patient not found"));
    }

    let appointment = Appointment::new(draft);
    ctx.store().insert_appointment(appointment.clone())?;

    tracing::info!(appointment_id = %appointment.id, "appointment created");
    Ok(appointment)
}

pub fn update(
    ctx: &AppContext,
    token: &str,
    id: AppointmentId,
    patch: AppointmentPatch,
) -> Result<Appointment, ApiError> {
    ctx.authorize(token, &Permission::APPOINTMENT_EDIT)?;

    ctx.store().update_appointment(id, patch).map_err(|err| match err {
        StoreError::NotFound => ApiError::not_found("appointment not found"),
        other => other.into(),
    })
}

pub fn delete(ctx: &AppContext, token: &str, id: AppointmentId) -> Result<(), ApiError> {
    ctx.authorize(token, &Permission::APPOINTMENT_DELETE)?;

    if ctx.store().appointment(id)?.is_none() {
        return Err(ApiError::not_found("appointment not found"));
    }
    ctx.coordinator().delete_appointment(id)?;
    Ok(())
}
