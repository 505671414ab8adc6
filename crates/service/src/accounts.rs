//! Registration, login, and the caller's own account view.

use serde::{Deserialize, Serialize};

use carebase_auth::{AuthError, Permission, RoleName};
use carebase_clinical::{Account, ClinicianProfile, PatientProfile, ProfileDraft};
use carebase_core::{AccountId, EmailAddress};
use carebase_store::{AccountGraph, ProfileRow};

use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: RoleName,
    /// Required when the role requires a profile; must match the role.
    pub profile: Option<ProfileDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub name: RoleName,
    pub permissions: Vec<Permission>,
}

/// Hydrated account representation returned by register/login/me.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub role: RoleView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinician_profile: Option<ClinicianProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_profile: Option<PatientProfile>,
}

impl AccountView {
    pub(crate) fn from_graph(graph: &AccountGraph) -> Self {
        let (clinician_profile, patient_profile) = match &graph.profile {
            Some(ProfileRow::Clinician(p)) => (Some(p.clone()), None),
            Some(ProfileRow::Patient(p)) => (None, Some(p.clone())),
            None => (None, None),
        };

        Self {
            id: graph.account.id,
            email: graph.account.email.to_string(),
            role: RoleView {
                name: graph.role.name,
                permissions: graph.permissions.clone(),
            },
            clinician_profile,
            patient_profile,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: AccountView,
}

/// Register a new account. Public: registration is the one unguarded write.
pub fn register(ctx: &AppContext, req: RegisterRequest) -> Result<AccountView, ApiError> {
    let graph = provision_account(ctx, &req.email, &req.password, req.role, req.profile)?;

    tracing::info!(email = %graph.account.email, role = %graph.role.name, "account registered");
    Ok(AccountView::from_graph(&graph))
}

/// Exchange credentials for a bearer token.
///
/// Unknown email, deleted account, and wrong password all collapse into the
/// same `Unauthenticated` answer; the login path leaks nothing.
pub fn login(ctx: &AppContext, req: LoginRequest) -> Result<LoginResponse, ApiError> {
    let Ok(email) = EmailAddress::parse(&req.email) else {
        return Err(ApiError::unauthenticated("invalid credentials"));
    };
    let Some(graph) = ctx.store().load_principal(email.as_str())? else {
        return Err(ApiError::unauthenticated("invalid credentials"));
    };

    if !ctx
        .hasher()
        .verify(&req.password, &graph.account.credential_hash)
    {
        return Err(ApiError::unauthenticated("invalid credentials"));
    }

    let token = ctx.issue_token(graph.account.email.as_str())?;

    tracing::info!(email = %graph.account.email, "login succeeded");
    Ok(LoginResponse {
        token,
        account: AccountView::from_graph(&graph),
    })
}

/// The caller's own hydrated account view.
pub fn me(ctx: &AppContext, token: &str) -> Result<AccountView, ApiError> {
    let principal = ctx.resolver().resolve(token)?;

    let graph = ctx
        .store()
        .load_principal(&principal.email)?
        .ok_or(AuthError::Unauthenticated)?;

    Ok(AccountView::from_graph(&graph))
}

/// Create an account (and its profile, when the role requires one) in one
/// transaction, then hand back the hydrated graph.
///
/// Shared by public registration and the guarded clinician/patient create
/// operations.
pub(crate) fn provision_account(
    ctx: &AppContext,
    email: &str,
    password: &str,
    role_name: RoleName,
    profile: Option<ProfileDraft>,
) -> Result<AccountGraph, ApiError> {
    let email = EmailAddress::parse(email)?;
    if password.trim().is_empty() {
        return Err(ApiError::validation("password cannot be empty"));
    }

    let role = ctx
        .store()
        .role_by_name(role_name)?
        .ok_or_else(|| ApiError::validation(format!("role '{role_name}' is not provisioned")))?;

    let credential_hash = ctx.hasher().hash(password)?;
    let account = Account::new(email.clone(), credential_hash, role.id);
    let profile_row = build_profile_row(role_name, &account, profile)?;

    // Uniqueness is the store's call: the losing writer of a concurrent
    // duplicate registration surfaces `Conflict` here.
    ctx.store().insert_account(account, profile_row)?;

    ctx.store()
        .load_principal(email.as_str())?
        .ok_or_else(|| ApiError::unavailable("account not readable after insert"))
}

fn build_profile_row(
    role: RoleName,
    account: &Account,
    draft: Option<ProfileDraft>,
) -> Result<Option<ProfileRow>, ApiError> {
    match draft {
        Some(ProfileDraft::Clinician(draft)) if role.requires_clinician_profile() => {
            draft.validate()?;
            Ok(Some(ProfileRow::Clinician(ClinicianProfile::new(
                account.id, draft,
            ))))
        }
        Some(ProfileDraft::Patient(draft)) if role.requires_patient_profile() => {
            draft.validate()?;
            Ok(Some(ProfileRow::Patient(PatientProfile::new(
                account.id, draft,
            ))))
        }
        Some(_) => Err(ApiError::validation(format!(
            "profile type does not match role '{role}'"
        ))),
        None if role.requires_clinician_profile() => Err(ApiError::validation(
            "role 'clinician' requires a clinician profile",
        )),
        None if role.requires_patient_profile() => Err(ApiError::validation(
            "role 'patient' requires a patient profile",
        )),
        None => Ok(None),
    }
}
