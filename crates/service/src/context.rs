//! Service wiring: store, token service, hasher, resolver, coordinator.

use std::sync::Arc;

use chrono::{Duration, Utc};

use carebase_auth::{Permission, Principal, TokenService, admit};
use carebase_store::{InMemoryStore, SoftDeleteCoordinator, Store, seed_catalog};

use crate::config::ServiceConfig;
use crate::credentials::{Argon2Hasher, CredentialHasher};
use crate::error::ApiError;
use crate::resolver::IdentityResolver;

/// Everything an operation needs, wired once at startup.
pub struct AppContext {
    store: Arc<dyn Store>,
    tokens: Arc<TokenService>,
    hasher: Arc<dyn CredentialHasher>,
    resolver: IdentityResolver,
    coordinator: SoftDeleteCoordinator,
    token_ttl: Duration,
}

impl AppContext {
    pub fn new(
        config: &ServiceConfig,
        store: Arc<dyn Store>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(config.token_secret.as_bytes()));
        let resolver = IdentityResolver::new(tokens.clone(), store.clone());
        let coordinator = SoftDeleteCoordinator::new(store.clone());

        Self {
            store,
            tokens,
            hasher,
            resolver,
            coordinator,
            token_ttl: config.token_ttl,
        }
    }

    /// A seeded in-memory context for tests and development.
    pub fn in_memory(config: &ServiceConfig) -> Result<Self, ApiError> {
        let store = Arc::new(InMemoryStore::new());
        seed_catalog(store.as_ref())?;

        Ok(Self::new(config, store, Arc::new(Argon2Hasher)))
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn hasher(&self) -> &dyn CredentialHasher {
        self.hasher.as_ref()
    }

    pub fn coordinator(&self) -> &SoftDeleteCoordinator {
        &self.coordinator
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// The full guard chain: `credential -> resolve -> admit -> principal`.
    ///
    /// Each protected operation calls this with its one required permission
    /// code; failures short-circuit before any side effect.
    pub fn authorize(&self, token: &str, required: &Permission) -> Result<Principal, ApiError> {
        let principal = self.resolver.resolve(token)?;
        admit(&principal, required)?;
        Ok(principal)
    }

    /// Issue a bearer token for a subject, valid for the configured ttl.
    pub fn issue_token(&self, subject: &str) -> Result<String, ApiError> {
        self.tokens
            .issue(subject, self.token_ttl, Utc::now())
            .map_err(|_| ApiError::unavailable("token signing failed"))
    }
}
