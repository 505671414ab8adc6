//! Identity resolution: opaque credential to trusted principal.
//!
//! The resolver is the only place a bearer token becomes an identity. It
//! verifies the signature and window, then hydrates the live account graph
//! behind the subject. A soft-deleted account simply has no graph, so every
//! token it ever received stops resolving before its expiry: implicit
//! revocation without a list.

use std::sync::Arc;

use chrono::Utc;

use carebase_auth::{AuthError, Principal, ProfileRef, TokenService};
use carebase_store::{AccountGraph, ProfileRow, Store};

use crate::error::ApiError;

pub struct IdentityResolver {
    tokens: Arc<TokenService>,
    store: Arc<dyn Store>,
}

impl IdentityResolver {
    pub fn new(tokens: Arc<TokenService>, store: Arc<dyn Store>) -> Self {
        Self { tokens, store }
    }

    /// Resolve a bearer token into a principal.
    ///
    /// Fails fast, before any business logic: malformed/expired tokens and
    /// unresolvable subjects never reach an operation. A principal is never
    /// fabricated for a subject without a live account.
    pub fn resolve(&self, token: &str) -> Result<Principal, ApiError> {
        let subject = self
            .tokens
            .verify(token, Utc::now())
            .map_err(AuthError::from)?;

        let graph = self
            .store
            .load_principal(&subject)?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(principal_from_graph(&graph))
    }
}

/// Flatten a hydrated account graph into a principal.
pub(crate) fn principal_from_graph(graph: &AccountGraph) -> Principal {
    Principal {
        account_id: graph.account.id,
        email: graph.account.email.to_string(),
        role: graph.role.name,
        has_all_permissions: graph.role.has_all_permissions,
        permissions: graph.permissions.iter().cloned().collect(),
        profile: graph.profile.as_ref().map(|row| match row {
            ProfileRow::Clinician(p) => ProfileRef::Clinician(p.id),
            ProfileRow::Patient(p) => ProfileRef::Patient(p.id),
        }),
    }
}
