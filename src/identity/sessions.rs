/**
 * Session Tokens
 *
 * This module issues and verifies the signed bearer tokens that carry a
 * session claim. Tokens are HS256 JWTs holding the subject id, the issue
 * time and the expiry time.
 *
 * The signing secret is handed to `TokenService` at construction; nothing in
 * here reads the process environment. Expiry is checked against an
 * injectable `Clock` so tests can move time forward.
 */

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default session lifetime
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
///
/// Used by tests that need to step past a token's expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID
    sub: String,
    /// Issued at time (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Decoded, time-bounded identity assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaim {
    pub subject_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Errors raised by `TokenService`
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, wrong secret, wrong algorithm or not a JWT at all.
    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// The claim's timestamps are not representable.
    #[error("Invalid token: malformed timestamps")]
    MalformedClaims,

    /// `expires_at <= now`
    #[error("Token expired at {0}")]
    Expired(DateTime<Utc>),

    /// `now + ttl` is past the representable range.
    #[error("Token lifetime {0} overflows the expiry timestamp")]
    ExpiryOutOfRange(Duration),

    /// Signing failed while issuing.
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service signing with `secret`
    ///
    /// # Arguments
    /// * `secret` - HMAC secret, already selected for the running environment
    /// * `ttl` - Lifetime of issued tokens
    /// * `clock` - Time source used for both issuing and expiry checks
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `clock` in `verify`.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    /// Create a token service with the default lifetime and the wall clock
    pub fn with_secret(secret: &[u8]) -> Self {
        Self::new(secret, Duration::days(DEFAULT_TOKEN_TTL_DAYS), Arc::new(SystemClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a subject
    ///
    /// # Returns
    /// A compact, URL-safe JWT string
    pub fn issue(&self, subject_id: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::ExpiryOutOfRange(self.ttl))?;
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify and decode a token
    ///
    /// Pure: no I/O, no renewal.
    pub fn verify(&self, token: &str) -> Result<SessionClaim, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Invalid)?;
        let claims = data.claims;

        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or(TokenError::MalformedClaims)?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenError::MalformedClaims)?;

        if expires_at <= self.clock.now() {
            return Err(TokenError::Expired(expires_at));
        }

        Ok(SessionClaim {
            subject_id: claims.sub,
            issued_at,
            expires_at,
        })
    }
}
