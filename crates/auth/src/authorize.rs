use thiserror::Error;

use crate::token::TokenError;
use crate::{Permission, Principal};

/// Authorization-boundary error.
///
/// `TokenExpired` is reported distinctly from `Unauthenticated` so clients
/// know to re-authenticate rather than retry with the same credential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("could not validate credentials")]
    Unauthenticated,

    #[error("the authentication token has expired")]
    TokenExpired,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Malformed | TokenError::Signing => AuthError::Unauthenticated,
        }
    }
}

/// Admit or reject a principal for an operation requiring `required`.
///
/// Pure predicate over already-resolved data:
/// - no IO
/// - no panics
/// - admits when the role carries the superuser capability or the code is in
///   the materialized set
pub fn admit(principal: &Principal, required: &Permission) -> Result<(), AuthError> {
    if principal.has_permission(required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(required.as_str().to_string()))
    }
}

/// A per-operation guard: [`admit`] partially applied to the operation's one
/// required permission code.
///
/// Each protected operation declares exactly one code, no and/or
/// combinations; an operation touching several concerns declares its most
/// restrictive code. Guards chain with identity resolution through ordinary
/// function composition: `credential -> resolve -> admit -> principal`.
#[derive(Debug, Clone)]
pub struct Guard {
    required: Permission,
}

impl Guard {
    pub const fn new(required: Permission) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &Permission {
        &self.required
    }

    /// Admit the principal, handing it back unchanged for the operation.
    pub fn admit<'p>(&self, principal: &'p Principal) -> Result<&'p Principal, AuthError> {
        admit(principal, &self.required)?;
        Ok(principal)
    }
}

/// Build the guard for an operation protected by `required`.
pub fn require(required: Permission) -> Guard {
    Guard::new(required)
}
