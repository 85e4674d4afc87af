use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::config::TokenSecret;
use crate::error::AppError;

/// The identity a session credential asserts (an email address).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(String);

impl Principal {
    /// Returns `None` for a blank identity.
    pub fn new(email: impl Into<String>) -> Option<Self> {
        let email = email.into();
        if email.trim().is_empty() {
            None
        } else {
            Some(Self(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Errors returned by credential verification. Only logged; clients always see 401.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("credential expired")]
    Expired,
    #[error("empty principal")]
    EmptyPrincipal,
    #[error("'sub' does not match 'email'")]
    SubjectMismatch,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    iss: String,
    sub: String,
    email: String,
    iat: u64,
    exp: u64,
}

/// Verified credential, as handed to the rest of the request.
#[derive(Debug, Clone)]
pub struct VerifiedSession {
    pub principal: Principal,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// HS256 session credential signer + verifier.
///
/// - One secret for both directions, loaded once at startup.
/// - `exp` is checked here (not by jsonwebtoken) so the boundary is strict:
///   a credential is rejected at exactly `exp`.
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct SessionTokens {
    issuer: String,
    ttl_seconds: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

impl SessionTokens {
    pub fn new(secret: &TokenSecret, issuer: impl Into<String>, ttl_seconds: u64) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            issuer,
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn sign(&self, principal: &Principal) -> Result<String, AppError> {
        self.sign_at(principal, unix_now())
    }

    /// Sign a credential as if issued at `issued_at` (unix seconds).
    pub fn sign_at(&self, principal: &Principal, issued_at: u64) -> Result<String, AppError> {
        let Some(exp) = issued_at.checked_add(self.ttl_seconds) else {
            error!(issued_at, ttl = self.ttl_seconds, "session credential expiry overflows");
            return Err(AppError::Internal);
        };

        let claims = SessionClaims {
            iss: self.issuer.clone(),
            sub: principal.as_str().to_string(),
            email: principal.as_str().to_string(),
            iat: issued_at,
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign session credential");
            AppError::Internal
        })
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedSession, CredentialError> {
        self.verify_at(token, unix_now())
    }

    /// Verify signature, issuer and expiry as of `now` (unix seconds).
    pub fn verify_at(&self, token: &str, now: u64) -> Result<VerifiedSession, CredentialError> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if now >= claims.exp {
            return Err(CredentialError::Expired);
        }
        if claims.sub != claims.email {
            return Err(CredentialError::SubjectMismatch);
        }
        let principal = Principal::new(claims.email).ok_or(CredentialError::EmptyPrincipal)?;

        Ok(VerifiedSession {
            principal,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
