/**
 * Password Hashing
 *
 * This module wraps bcrypt for credential storage. Every call to `hash`
 * draws a fresh random salt, which bcrypt embeds in its output, so two
 * hashes of the same plaintext never compare equal while both still verify.
 *
 * # Security
 *
 * - Plaintext passwords are never logged
 * - The work factor is configurable (bcrypt cost, 4-31)
 * - Verification is constant-time (handled by bcrypt)
 */

use thiserror::Error;

/// Default bcrypt work factor.
pub const DEFAULT_COST: u32 = 10;

/// Cheapest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Most expensive cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Errors raised while hashing or verifying credentials.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The input could not be hashed, or the stored value is not a bcrypt hash.
    #[error("Credential encoding error: {0}")]
    Encoding(#[from] bcrypt::BcryptError),

    /// The configured cost is outside the range bcrypt accepts.
    #[error("Invalid bcrypt cost {0} (expected {min}-{max})", min = MIN_COST, max = MAX_COST)]
    InvalidCost(u32),
}

/// One-way credential hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::InvalidCost` if `cost` is outside 4-31.
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    ///
    /// The returned string carries the algorithm version, cost and salt,
    /// and is safe to persist.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Compare a plaintext password against a stored hash
    ///
    /// A mismatch is `Ok(false)`, never an error. An error means the stored
    /// value is not something `hash` produced.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, PasswordError> {
        Ok(bcrypt::verify(plaintext, hashed)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}
