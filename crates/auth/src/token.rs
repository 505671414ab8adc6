//! Signed, expiring bearer tokens.
//!
//! Tokens are stateless HS256 JWTs carrying only the subject and a time
//! window. There is no revocation list: logout is client-side discard, and
//! soft-deleting an account invalidates its tokens implicitly because the
//! identity resolver no longer finds a live subject.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account's email.
    pub sub: String,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiry, unix seconds.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally invalid token or signature mismatch.
    #[error("token is malformed")]
    Malformed,

    /// Signature and structure are fine; the window has elapsed.
    #[error("token has expired")]
    Expired,

    /// Signing failed (key material problem at issue time).
    #[error("token signing failed")]
    Signing,
}

/// Deterministically validate a token's time window.
///
/// The clock check is a strict `now >= exp` with zero leeway: a token
/// presented at its exact expiry instant is already expired. Kept separate
/// from decoding so the window rule is testable without key material.
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}

/// Issues and verifies bearer tokens with a process-wide signing key.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The library's expiry check allows leeway; the strict window rule
        // lives in `validate_claims` instead.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token for `subject`, valid until `now + ttl`.
    pub fn issue(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_owned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Verify a token and return its subject.
    ///
    /// Fails `Malformed` on structural/signature problems and `Expired` once
    /// `now >= exp`. The two are distinct so callers can tell "re-login"
    /// apart from "reject".
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Malformed)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-signing-key")
    }

    #[test]
    fn round_trip_returns_subject() {
        let svc = service();
        let now = Utc::now();
        let token = svc.issue("alice@example.com", Duration::minutes(30), now).unwrap();

        let subject = svc.verify(&token, now).unwrap();
        assert_eq!(subject, "alice@example.com");
    }

    #[test]
    fn expired_exactly_at_expiry_instant() {
        let svc = service();
        let now = Utc::now();
        let token = svc.issue("alice@example.com", Duration::seconds(30), now).unwrap();

        // One second before the boundary the token is still good.
        assert!(svc.verify(&token, now + Duration::seconds(29)).is_ok());

        // At and after the boundary it is expired, not malformed.
        assert_eq!(
            svc.verify(&token, now + Duration::seconds(30)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            svc.verify(&token, now + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn corrupted_signature_is_malformed() {
        let svc = service();
        let now = Utc::now();
        let token = svc.issue("alice@example.com", Duration::minutes(5), now).unwrap();

        // Flip a byte in the signature segment.
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(svc.verify(&tampered, now), Err(TokenError::Malformed));
    }

    #[test]
    fn wrong_key_is_malformed() {
        let now = Utc::now();
        let token = service()
            .issue("alice@example.com", Duration::minutes(5), now)
            .unwrap();

        let other = TokenService::new(b"another-key");
        assert_eq!(other.verify(&token, now), Err(TokenError::Malformed));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            service().verify("not.a.token", Utc::now()),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn window_rule_is_strict() {
        let claims = Claims {
            sub: "x@y.z".into(),
            iat: 1_000,
            exp: 2_000,
        };
        let at = |secs: i64| DateTime::from_timestamp(secs, 0).unwrap();

        assert!(validate_claims(&claims, at(1_999)).is_ok());
        assert_eq!(validate_claims(&claims, at(2_000)), Err(TokenError::Expired));
        assert_eq!(validate_claims(&claims, at(2_001)), Err(TokenError::Expired));
    }
}
