//! `carebase-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from transport and storage: it
//! issues and verifies bearer tokens, names the permission universe and the
//! closed role set, and decides admission for an already-resolved principal.
//! Hydrating a principal from the store is the identity resolver's job
//! (`carebase-service`); nothing here performs IO.

pub mod authorize;
pub mod catalog;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod token;

pub use authorize::{AuthError, Guard, admit, require};
pub use catalog::grants_of;
pub use permissions::Permission;
pub use principal::{Principal, ProfileRef};
pub use roles::RoleName;
pub use token::{Claims, TokenError, TokenService, validate_claims};
