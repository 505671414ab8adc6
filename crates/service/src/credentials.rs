//! Credential hashing boundary.
//!
//! The hashing primitive is an external collaborator: the service only
//! depends on this trait, and the stored hash stays an opaque PHC string.
//! `Argon2Hasher` is the default implementation.

use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential hashing failed: {0}")]
    Hash(String),
}

pub trait CredentialHasher: Send + Sync {
    /// Hash a secret into an opaque, self-describing string.
    fn hash(&self, secret: &str) -> Result<String, CredentialError>;

    /// Check a secret against a stored hash. Unparseable hashes verify as
    /// false, never as an error: a corrupt row must not leak detail to the
    /// login path.
    fn verify(&self, secret: &str, hash: &str) -> bool;
}

/// Argon2id with default parameters and a random 16-byte salt per hash.
#[derive(Debug, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| CredentialError::Hash(e.to_string()))?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| CredentialError::Hash(e.to_string()))?;

        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    }

    fn verify(&self, secret: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("s3cret").unwrap();

        assert!(hasher.verify("s3cret", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = Argon2Hasher;
        assert_ne!(
            hasher.hash("s3cret").unwrap(),
            hasher.hash("s3cret").unwrap()
        );
    }

    #[test]
    fn garbage_hash_verifies_false() {
        assert!(!Argon2Hasher.verify("s3cret", "not-a-phc-string"));
    }
}
