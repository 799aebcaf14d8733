/**
 * Auth Service
 *
 * `AuthService` orchestrates registration, login, self-lookup, profile
 * updates and token authentication on top of `PasswordHasher`,
 * `TokenService` and an `IdentityStore`. It owns every decision about which
 * `AuthError` kind a failure becomes.
 *
 * # Authentication Flow
 *
 * 1. **Register**: email pre-check → hash → create → `{id, email, name}`
 * 2. **Login**: lookup with credentials → verify → issue token
 * 3. **Authenticate**: strip `Bearer ` → verify token → subject id
 * 4. **Get self / update profile**: parse subject id → store call
 *
 * # Security
 *
 * - Login failures never reveal whether the email exists
 * - Authentication failures never reveal why the token was rejected
 * - An unknown email pays for one bcrypt verification, like a wrong password
 * - Passwords, hashes, tokens and email addresses are never logged
 *
 * # Concurrency
 *
 * The service holds no mutable state; clones share the same store. Dropping
 * an operation's future drops the in-flight store call with it. An optional
 * per-call timeout bounds every store call.
 */

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use uuid::Uuid;

use crate::identity::error::AuthError;
use crate::identity::password::PasswordHasher;
use crate::identity::sessions::{SessionClaim, TokenService};
use crate::identity::store::{IdentityStore, NewUser, ProfileUpdate, StoreError, UserRecord};

/// Prefix of the `Authorization` header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Hashed once per service and verified against when the email is unknown
const DUMMY_PASSWORD: &str = "idgate-timing-equalizer";

/// Authentication and identity orchestration
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
    store_timeout: Option<Duration>,
    dummy_hash: Arc<OnceLock<String>>,
}

impl AuthService {
    pub fn new(store: Arc<dyn IdentityStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
            store_timeout: None,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Bound every store call by `limit`
    pub fn with_store_timeout(mut self, limit: Option<Duration>) -> Self {
        self.store_timeout = limit;
        self
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// A hash at the configured cost that no real password matches
    fn dummy_hash(&self) -> Result<&str, AuthError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash);
        }
        let hash = self.hasher.hash(DUMMY_PASSWORD)?;
        Ok(self.dummy_hash.get_or_init(|| hash))
    }

    async fn store_call<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StoreError::Timeout(limit))?,
            None => call.await,
        }
    }

    /// Register a new user
    ///
    /// # Returns
    /// The created record; it carries no password hash.
    ///
    /// # Errors
    /// * `Conflict` - the email is taken, whether seen by the pre-check or
    ///   reported by the store's atomic create
    /// * `BadRequest` - the store rejected a field
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserRecord, AuthError> {
        if self.store_call(self.store.find_by_email(email)).await?.is_some() {
            tracing::warn!("Registration rejected: email already registered");
            return Err(AuthError::user_conflict());
        }

        let password_hash = self.hasher.hash(password)?;

        let new_user = NewUser {
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
        };

        let user = self
            .store_call(self.store.create(new_user))
            .await
            .map_err(|err| match err {
                StoreError::DuplicateKey { .. } => {
                    tracing::warn!("Registration rejected: email registered concurrently");
                    AuthError::user_conflict()
                }
                StoreError::Validation(e) => {
                    tracing::warn!("Store rejected new user: {}", e);
                    AuthError::bad_request()
                }
                other => other.into(),
            })?;

        tracing::info!("User created successfully: {}", user.id);
        Ok(user)
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(credentials) = self
            .store_call(self.store.find_by_email_with_credentials(email))
            .await?
        else {
            self.hasher.verify(password, self.dummy_hash()?)?;
            tracing::warn!("Login failed: unknown email");
            return Err(AuthError::wrong_credentials());
        };

        if !self.hasher.verify(password, &credentials.password_hash)? {
            tracing::warn!("Login failed: wrong password for user {}", credentials.user.id);
            return Err(AuthError::wrong_credentials());
        }

        let token = self.tokens.issue(&credentials.user.id.to_string())?;

        tracing::info!("User logged in successfully: {}", credentials.user.id);
        Ok(token)
    }

    /// Verify a bare token and return its subject id
    ///
    /// Every failure becomes the same `Unauthorized`.
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        self.verify_session(token).map(|claim| claim.subject_id)
    }

    /// Verify a bare token and return the whole claim
    pub fn verify_session(&self, token: &str) -> Result<SessionClaim, AuthError> {
        self.tokens.verify(token).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            AuthError::authorization_required()
        })
    }

    /// Authenticate an `Authorization` header value
    ///
    /// Only `Bearer <token>` is accepted.
    pub fn authenticate_header(&self, header: Option<&str>) -> Result<String, AuthError> {
        let header = header.ok_or_else(|| {
            tracing::warn!("Missing authorization header");
            AuthError::authorization_required()
        })?;

        let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
            tracing::warn!("Invalid authorization header format");
            AuthError::authorization_required()
        })?;

        self.authenticate(token)
    }

    /// Look up the authenticated user
    ///
    /// The id was vouched for by a token, so a missing record is an
    /// inconsistency the caller decides how to present: it comes back as
    /// `Ok(None)`.
    pub async fn get_self(&self, user_id: &str) -> Result<Option<UserRecord>, AuthError> {
        let id = parse_user_id(user_id)?;
        Ok(self.store_call(self.store.find_by_id(id)).await?)
    }

    /// Replace the authenticated user's email and name
    ///
    /// # Errors
    /// * `BadRequest` - malformed id, or the store rejected a field
    /// * `NotFound` - no such user
    /// * `Conflict` - the email belongs to another user
    pub async fn update_profile(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> Result<UserRecord, AuthError> {
        let id = parse_user_id(user_id)?;
        let update = ProfileUpdate {
            email: email.to_string(),
            name: name.to_string(),
        };

        let user = self
            .store_call(self.store.update_by_id(id, update))
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    tracing::warn!("User not found: {}", id);
                    AuthError::user_not_found()
                }
                StoreError::Validation(e) => {
                    tracing::warn!("Store rejected profile update: {}", e);
                    AuthError::bad_request()
                }
                StoreError::DuplicateKey { .. } => {
                    tracing::warn!("Profile update rejected for {}: email already registered", id);
                    AuthError::user_conflict()
                }
                other => other.into(),
            })?;

        tracing::info!("Profile updated: {}", user.id);
        Ok(user)
    }
}

fn parse_user_id(user_id: &str) -> Result<Uuid, AuthError> {
    Uuid::parse_str(user_id).map_err(|e| {
        tracing::warn!("Malformed user id {:?}: {}", user_id, e);
        AuthError::bad_request()
    })
}
