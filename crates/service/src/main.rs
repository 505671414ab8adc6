//! Wiring harness: a seeded in-memory backend driven through a short smoke
//! flow. Transport is an external collaborator, so this binary exercises
//! the guard chain and soft-delete semantics directly.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use carebase_auth::RoleName;
use carebase_clinical::{AppointmentDraft, ClinicianDraft, Gender, PatientDraft, RecordDraft};
use carebase_service::accounts::{LoginRequest, RegisterRequest};
use carebase_service::clinicians::CreateClinicianRequest;
use carebase_service::patients::CreatePatientRequest;
use carebase_service::{AppContext, ServiceConfig, accounts, appointments, clinicians, dashboard, patients, records};

fn main() -> Result<()> {
    carebase_observability::init();

    let config = ServiceConfig::from_env();
    let ctx = AppContext::in_memory(&config)?;

    accounts::register(
        &ctx,
        RegisterRequest {
            email: "admin@clinic.example".into(),
            password: "admin-pass".into(),
            role: RoleName::Administrator,
            profile: None,
        },
    )?;
    let admin = accounts::login(
        &ctx,
        LoginRequest {
            email: "admin@clinic.example".into(),
            password: "admin-pass".into(),
        },
    )?;

    let clinician = clinicians::create(
        &ctx,
        &admin.token,
        CreateClinicianRequest {
            email: "dana@clinic.example".into(),
            password: "dana-pass".into(),
            profile: ClinicianDraft {
                first_name: "Dana".into(),
                last_name: "Reyes".into(),
                specialty: "Cardiology".into(),
                contact_number: "555-0101".into(),
            },
        },
    )?;

    let patient = patients::create(
        &ctx,
        &admin.token,
        CreatePatientRequest {
            email: "miriam@home.example".into(),
            password: "miriam-pass".into(),
            profile: PatientDraft {
                first_name: "Miriam".into(),
                last_name: "Okafor".into(),
                date_of_birth: NaiveDate::from_ymd_opt(1984, 5, 2).expect("valid date"),
                gender: Gender::Female,
                contact_number: "555-0202".into(),
            },
        },
    )?;

    appointments::create(
        &ctx,
        &admin.token,
        AppointmentDraft {
            clinician_id: clinician.profile.id,
            patient_id: patient.profile.id,
            scheduled_at: chrono::Utc::now() + chrono::Duration::days(3),
            reason: Some("initial consultation".into()),
        },
    )?;

    let dana = accounts::login(
        &ctx,
        LoginRequest {
            email: "dana@clinic.example".into(),
            password: "dana-pass".into(),
        },
    )?;

    records::create(
        &ctx,
        &dana.token,
        RecordDraft {
            clinician_id: clinician.profile.id,
            patient_id: patient.profile.id,
            visit_date: chrono::Utc::now(),
            diagnosis: "hypertension".into(),
            treatment: "lifestyle changes".into(),
            notes: None,
        },
    )?;

    // A clinician holds no dashboard grant; only the superuser capability
    // reaches it.
    match dashboard::summary(&ctx, &dana.token) {
        Err(err) => tracing::info!(%err, code = err.code, "clinician denied dashboard"),
        Ok(_) => bail!("clinician unexpectedly admitted to the dashboard"),
    }
    let summary = dashboard::summary(&ctx, &admin.token)?;
    tracing::info!(?summary, "dashboard summary");

    // Deleting the clinician tombstones the profile and its account; the
    // still-unexpired token stops resolving immediately.
    clinicians::delete(&ctx, &admin.token, clinician.profile.id)?;
    match accounts::me(&ctx, &dana.token) {
        Err(err) => tracing::info!(%err, code = err.code, "deleted clinician's token rejected"),
        Ok(_) => bail!("deleted clinician's token still resolves"),
    }

    let remaining = appointments::list(&ctx, &admin.token)?;
    tracing::info!(
        count = remaining.len(),
        "appointments survive the clinician's deletion"
    );

    Ok(())
}
