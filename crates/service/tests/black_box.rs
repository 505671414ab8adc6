//! Black-box scenarios driven through the public service operations only,
//! against a seeded in-memory backend.

use chrono::{Duration, NaiveDate, Utc};

use carebase_auth::{RoleName, TokenService};
use carebase_clinical::{
    AppointmentDraft, ClinicianDraft, Gender, PatientDraft, PatientPatch, ProfileDraft,
    RecordDraft,
};
use carebase_service::accounts::{LoginRequest, RegisterRequest};
use carebase_service::clinicians::CreateClinicianRequest;
use carebase_service::patients::CreatePatientRequest;
use carebase_service::{
    AppContext, ErrorCategory, ServiceConfig, accounts, appointments, clinicians, dashboard,
    patients, records,
};

const SECRET: &str = "black-box-secret";

fn ctx() -> AppContext {
    AppContext::in_memory(&ServiceConfig::for_tests(SECRET)).unwrap()
}

fn admin_token(ctx: &AppContext) -> String {
    accounts::register(
        ctx,
        RegisterRequest {
            email: "admin@clinic.example".into(),
            password: "admin-pass".into(),
            role: RoleName::Administrator,
            profile: None,
        },
    )
    .unwrap();

    login(ctx, "admin@clinic.example", "admin-pass")
}

fn login(ctx: &AppContext, email: &str, password: &str) -> String {
    accounts::login(
        ctx,
        LoginRequest {
            email: email.into(),
            password: password.into(),
        },
    )
    .unwrap()
    .token
}

fn clinician_draft(last_name: &str) -> ClinicianDraft {
    ClinicianDraft {
        first_name: "Dana".into(),
        last_name: last_name.into(),
        specialty: "Cardiology".into(),
        contact_number: "555-0101".into(),
    }
}

fn patient_draft(last_name: &str) -> PatientDraft {
    PatientDraft {
        first_name: "Miriam".into(),
        last_name: last_name.into(),
        date_of_birth: NaiveDate::from_ymd_opt(1984, 5, 2).unwrap(),
        gender: Gender::Female,
        contact_number: "555-0202".into(),
    }
}

fn add_clinician(ctx: &AppContext, admin: &str, email: &str) -> carebase_core::ClinicianId {
    clinicians::create(
        ctx,
        admin,
        CreateClinicianRequest {
            email: email.into(),
            password: "clinician-pass".into(),
            profile: clinician_draft("Reyes"),
        },
    )
    .unwrap()
    .profile
    .id
}

fn add_patient(ctx: &AppContext, admin: &str, email: &str) -> carebase_core::PatientId {
    patients::create(
        ctx,
        admin,
        CreatePatientRequest {
            email: email.into(),
            password: "patient-pass".into(),
            profile: patient_draft("Okafor"),
        },
    )
    .unwrap()
    .profile
    .id
}

#[test]
fn register_login_me_round_trip() {
    let ctx = ctx();

    let view = accounts::register(
        &ctx,
        RegisterRequest {
            email: "Clinician@X.example ".into(),
            password: "pass".into(),
            role: RoleName::Clinician,
            profile: Some(ProfileDraft::Clinician(clinician_draft("Reyes"))),
        },
    )
    .unwrap();

    // The natural key is normalized at the boundary.
    assert_eq!(view.email, "clinician@x.example");
    assert!(view.clinician_profile.is_some());

    let token = login(&ctx, "clinician@x.example", "pass");
    let me = accounts::me(&ctx, &token).unwrap();

    assert_eq!(me.role.name, RoleName::Clinician);
    let codes: Vec<&str> = me.role.permissions.iter().map(|p| p.as_str()).collect();
    assert!(codes.contains(&"record.view"));
    assert!(!codes.contains(&"clinician.view"));
}

#[test]
fn registration_without_required_profile_is_validation() {
    let ctx = ctx();

    let err = accounts::register(
        &ctx,
        RegisterRequest {
            email: "c@x.example".into(),
            password: "pass".into(),
            role: RoleName::Clinician,
            profile: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.category, ErrorCategory::Validation);

    // A profile supplied for a role that takes none is rejected, not
    // silently dropped.
    let err = accounts::register(
        &ctx,
        RegisterRequest {
            email: "a@x.example".into(),
            password: "pass".into(),
            role: RoleName::Administrator,
            profile: Some(ProfileDraft::Clinician(clinician_draft("Reyes"))),
        },
    )
    .unwrap_err();
    assert_eq!(err.category, ErrorCategory::Validation);
}

#[test]
fn clinician_is_forbidden_where_admin_is_admitted() {
    let ctx = ctx();
    let admin = admin_token(&ctx);
    add_clinician(&ctx, &admin, "dana@clinic.example");

    let dana = login(&ctx, "dana@clinic.example", "clinician-pass");

    // Listing the staff directory is outside the clinician grant set.
    let err = clinicians::list(&ctx, &dana).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Forbidden);
    assert_eq!(err.code, 403);

    // The same operation with an administrator token succeeds.
    let listed = clinicians::list(&ctx, &admin).unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn duplicate_email_registration_conflicts() {
    let ctx = ctx();

    let request = || RegisterRequest {
        email: "dup@x.example".into(),
        password: "pass".into(),
        role: RoleName::FrontDesk,
        profile: None,
    };

    accounts::register(&ctx, request()).unwrap();
    let err = accounts::register(&ctx, request()).unwrap_err();

    assert_eq!(err.category, ErrorCategory::Conflict);
    assert_eq!(err.code, 409);
}

#[test]
fn revoked_account_token_is_unauthenticated_not_forbidden() {
    let ctx = ctx();
    let admin = admin_token(&ctx);
    let clinician_id = add_clinician(&ctx, &admin, "dana@clinic.example");

    let dana = login(&ctx, "dana@clinic.example", "clinician-pass");
    assert!(accounts::me(&ctx, &dana).is_ok());

    clinicians::delete(&ctx, &admin, clinician_id).unwrap();

    // The still-unexpired token stops resolving: deletion revokes it
    // implicitly, and the failure is an identity failure, not a
    // permission failure.
    let err = accounts::me(&ctx, &dana).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Unauthenticated);

    let err = records::list(&ctx, &dana, None).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Unauthenticated);
}

#[test]
fn expired_token_is_reported_distinctly() {
    let ctx = ctx();
    let admin = admin_token(&ctx);
    add_clinician(&ctx, &admin, "dana@clinic.example");

    // Mint a token that expires at its own issue instant.
    let tokens = TokenService::new(SECRET.as_bytes());
    let expired = tokens
        .issue("dana@clinic.example", Duration::zero(), Utc::now())
        .unwrap();

    let err = accounts::me(&ctx, &expired).unwrap_err();
    assert_eq!(err.category, ErrorCategory::TokenExpired);
    assert_eq!(err.code, 498);
}

#[test]
fn malformed_token_is_unauthenticated() {
    let ctx = ctx();

    let err = accounts::me(&ctx, "not.a.token").unwrap_err();
    assert_eq!(err.category, ErrorCategory::Unauthenticated);
    assert_eq!(err.code, 401);
}

#[test]
fn listings_and_dashboard_exclude_deleted_rows() {
    let ctx = ctx();
    let admin = admin_token(&ctx);

    let kept = add_patient(&ctx, &admin, "kept@home.example");
    let dropped = add_patient(&ctx, &admin, "dropped@home.example");

    patients::delete(&ctx, &admin, dropped).unwrap();

    let listed = patients::list(&ctx, &admin).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept);

    let err = patients::get(&ctx, &admin, dropped).unwrap_err();
    assert_eq!(err.category, ErrorCategory::NotFound);

    let summary = dashboard::summary(&ctx, &admin).unwrap();
    assert_eq!(summary.total_patients, 1);
}

#[test]
fn dashboard_is_reachable_only_through_the_superuser_capability() {
    let ctx = ctx();
    let admin = admin_token(&ctx);
    add_clinician(&ctx, &admin, "dana@clinic.example");

    let dana = login(&ctx, "dana@clinic.example", "clinician-pass");
    let err = dashboard::summary(&ctx, &dana).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Forbidden);

    assert!(dashboard::summary(&ctx, &admin).is_ok());
}

#[test]
fn appointment_listing_is_scoped_by_caller_profile() {
    let ctx = ctx();
    let admin = admin_token(&ctx);

    let dana = add_clinician(&ctx, &admin, "dana@clinic.example");
    let elio = add_clinician(&ctx, &admin, "elio@clinic.example");
    let miriam = add_patient(&ctx, &admin, "miriam@home.example");

    accounts::register(
        &ctx,
        RegisterRequest {
            email: "desk@clinic.example".into(),
            password: "desk-pass".into(),
            role: RoleName::FrontDesk,
            profile: None,
        },
    )
    .unwrap();
    let desk = login(&ctx, "desk@clinic.example", "desk-pass");

    for clinician_id in [dana, elio] {
        appointments::create(
            &ctx,
            &desk,
            AppointmentDraft {
                clinician_id,
                patient_id: miriam,
                scheduled_at: Utc::now() + Duration::days(1),
                reason: None,
            },
        )
        .unwrap();
    }

    // Front desk sees everything, participants see their own slice.
    assert_eq!(appointments::list(&ctx, &desk).unwrap().len(), 2);

    let dana_token = login(&ctx, "dana@clinic.example", "clinician-pass");
    assert_eq!(appointments::list(&ctx, &dana_token).unwrap().len(), 1);

    let miriam_token = login(&ctx, "miriam@home.example", "patient-pass");
    assert_eq!(appointments::list(&ctx, &miriam_token).unwrap().len(), 2);

    // Patients may look but not book.
    let err = appointments::create(
        &ctx,
        &miriam_token,
        AppointmentDraft {
            clinician_id: dana,
            patient_id: miriam,
            scheduled_at: Utc::now() + Duration::days(2),
            reason: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.category, ErrorCategory::Forbidden);
}

#[test]
fn record_listing_is_pinned_to_the_calling_clinician() {
    let ctx = ctx();
    let admin = admin_token(&ctx);

    let dana = add_clinician(&ctx, &admin, "dana@clinic.example");
    let elio = add_clinician(&ctx, &admin, "elio@clinic.example");
    let first = add_patient(&ctx, &admin, "first@home.example");
    let second = add_patient(&ctx, &admin, "second@home.example");

    let dana_token = login(&ctx, "dana@clinic.example", "clinician-pass");
    let elio_token = login(&ctx, "elio@clinic.example", "clinician-pass");

    let draft = |clinician_id, patient_id| RecordDraft {
        clinician_id,
        patient_id,
        visit_date: Utc::now(),
        diagnosis: "hypertension".into(),
        treatment: "lifestyle changes".into(),
        notes: None,
    };

    records::create(&ctx, &dana_token, draft(dana, first)).unwrap();
    records::create(&ctx, &dana_token, draft(dana, second)).unwrap();
    records::create(&ctx, &elio_token, draft(elio, first)).unwrap();

    // Dana sees her two records; the patient filter narrows further.
    assert_eq!(records::list(&ctx, &dana_token, None).unwrap().len(), 2);
    let filtered = records::list(&ctx, &dana_token, Some(second)).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].patient_id, second);

    // The administrator sees all three.
    assert_eq!(records::list(&ctx, &admin, None).unwrap().len(), 3);
}

#[test]
fn partial_update_mutates_only_supplied_fields() {
    let ctx = ctx();
    let admin = admin_token(&ctx);
    let miriam = add_patient(&ctx, &admin, "miriam@home.example");

    let updated = patients::update(
        &ctx,
        &admin,
        miriam,
        PatientPatch {
            contact_number: Some("555-9999".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.contact_number, "555-9999");
    assert_eq!(updated.first_name, "Miriam");
    assert_eq!(updated.last_name, "Okafor");
    assert_eq!(updated.gender, Gender::Female);
}

#[test]
fn dependent_records_survive_participant_deletion() {
    let ctx = ctx();
    let admin = admin_token(&ctx);

    let dana = add_clinician(&ctx, &admin, "dana@clinic.example");
    let miriam = add_patient(&ctx, &admin, "miriam@home.example");

    appointments::create(
        &ctx,
        &admin,
        AppointmentDraft {
            clinician_id: dana,
            patient_id: miriam,
            scheduled_at: Utc::now() + Duration::days(1),
            reason: Some("follow-up".into()),
        },
    )
    .unwrap();

    clinicians::delete(&ctx, &admin, dana).unwrap();

    // No cascade to dependent records: the appointment stays addressable.
    assert_eq!(appointments::list(&ctx, &admin).unwrap().len(), 1);

    // But a deleted clinician can no longer be booked.
    let err = appointments::create(
        &ctx,
        &admin,
        AppointmentDraft {
            clinician_id: dana,
            patient_id: miriam,
            scheduled_at: Utc::now() + Duration::days(2),
            reason: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.category, ErrorCategory::NotFound);

    // Deleting twice stays a success at the delete layer underneath, but
    // the caller-facing operation reports the vanished row.
    let err = clinicians::delete(&ctx, &admin, dana).unwrap_err();
    assert_eq!(err.category, ErrorCategory::NotFound);
}
