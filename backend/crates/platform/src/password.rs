//! Password Hashing and Verification
//!
//! bcrypt based password handling with:
//! - A validated cost factor (`Cost`, log2 of the key-expansion rounds)
//! - Self-describing hash strings (`$2b$<cost>$<salt><digest>`)
//! - Zeroization of clear text on drop
//! - Blocking-pool wrappers for use from async code
//!
//! ## Security Features
//! - Random 128-bit salt per hash, so equal inputs never share a hash
//! - Cost factor embedded in the hash, so verification needs no configuration
//! - Constant-time digest comparison inside `bcrypt::verify`
//! - Malformed hashes are reported as errors, never as a plain mismatch

use std::fmt;
use std::str::FromStr;

use bcrypt::{BcryptError, HashParts};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Smallest cost factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Largest cost factor bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Cost factor used when none is configured (~250ms on commodity hardware)
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Length of a bcrypt modular-crypt string
const HASH_STRING_LEN: usize = 60;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost factor outside `MIN_COST..=MAX_COST`
    #[error("Cost factor must be between {min} and {max} (got {actual})")]
    InvalidCost { min: u32, max: u32, actual: u32 },

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a well-formed bcrypt string
    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),

    /// The blocking task running the hash was cancelled or panicked
    #[error("Password hashing task failed: {0}")]
    TaskFailed(String),
}

impl From<BcryptError> for PasswordHashError {
    fn from(err: BcryptError) -> Self {
        match err {
            // `Cost` is checked before hashing, so bcrypt only rejects a cost
            // that was read out of a stored hash
            BcryptError::CostNotAllowed(_)
            | BcryptError::InvalidCost(_)
            | BcryptError::InvalidPrefix(_)
            | BcryptError::InvalidHash(_)
            | BcryptError::InvalidSaltLen(_)
            | BcryptError::InvalidBase64(_) => PasswordHashError::InvalidHashFormat(err.to_string()),
            other => PasswordHashError::HashingFailed(other.to_string()),
        }
    }
}

// ============================================================================
// Cost Factor
// ============================================================================

/// bcrypt cost factor, guaranteed to lie in `MIN_COST..=MAX_COST`
///
/// Every increment doubles the work needed per hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u32);

impl Cost {
    pub fn new(value: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_COST..=MAX_COST).contains(&value) {
            return Err(PasswordHashError::InvalidCost {
                min: MIN_COST,
                max: MAX_COST,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self(DEFAULT_COST)
    }
}

impl TryFrom<u32> for Cost {
    type Error = PasswordHashError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// No policy checks are applied here; bcrypt accepts any byte string and
/// only the first 72 bytes contribute to the digest.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, Cost};
///
/// let password = ClearTextPassword::new("sUperpassw0rd!");
/// let hashed = password.hash(Cost::new(4)?)?;
/// assert_eq!(hashed.verify(&password)?, true);
/// # Ok::<(), platform::password::PasswordHashError>(())
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with a fresh random salt
    ///
    /// Blocks the current thread for the duration of the key expansion.
    /// From async code use [`hash_async`] instead.
    pub fn hash(&self, cost: Cost) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(self.as_bytes(), cost.get())?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in bcrypt modular-crypt format
///
/// The string carries everything needed for verification:
/// - Algorithm version (`2b`)
/// - Cost factor
/// - 22 character salt
/// - 31 character digest
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored hash string, rejecting anything that is not bcrypt
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        if hash.len() != HASH_STRING_LEN {
            return Err(PasswordHashError::InvalidHashFormat(format!(
                "expected {} characters, got {}",
                HASH_STRING_LEN,
                hash.len()
            )));
        }
        let parts = HashParts::from_str(&hash)?;
        Cost::new(parts.get_cost()).map_err(|_| {
            PasswordHashError::InvalidHashFormat(format!(
                "embedded cost {} is outside {}..={}",
                parts.get_cost(),
                MIN_COST,
                MAX_COST
            ))
        })?;
        Ok(Self { hash })
    }

    pub fn as_hash_string(&self) -> &str {
        &self.hash
    }

    /// Cost factor embedded in the hash
    pub fn cost(&self) -> Result<Cost, PasswordHashError> {
        let parts = HashParts::from_str(&self.hash)?;
        Cost::new(parts.get_cost())
    }

    /// Verify a password against this hash
    ///
    /// ## Returns
    /// - `Ok(true)` if the password matches
    /// - `Ok(false)` if it does not
    /// - `Err(_)` if the stored hash cannot be decoded
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        Ok(bcrypt::verify(password.as_bytes(), &self.hash)?)
    }

    /// True when the hash was produced with a cost below `target`
    pub fn needs_rehash(&self, target: Cost) -> bool {
        match self.cost() {
            Ok(cost) => cost < target,
            Err(_) => true,
        }
    }
}

impl FromStr for HashedPassword {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hash_string(s)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

/// Verify a plaintext against an unparsed hash string
///
/// Malformed input surfaces as `Err(InvalidHashFormat)`, distinct from
/// `Ok(false)`.
pub fn verify_str(password: &ClearTextPassword, hash: &str) -> Result<bool, PasswordHashError> {
    let hashed = HashedPassword::from_hash_string(hash)?;
    hashed.verify(password)
}

// ============================================================================
// Async wrappers
// ============================================================================

/// Hash on the blocking thread pool
pub async fn hash_async(
    password: ClearTextPassword,
    cost: Cost,
) -> Result<HashedPassword, PasswordHashError> {
    tokio::task::spawn_blocking(move || password.hash(cost))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "bcrypt hashing task did not complete");
            PasswordHashError::TaskFailed(e.to_string())
        })?
}

/// Verify on the blocking thread pool
pub async fn verify_async(
    password: ClearTextPassword,
    hashed: HashedPassword,
) -> Result<bool, PasswordHashError> {
    tokio::task::spawn_blocking(move || hashed.verify(&password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "bcrypt verification task did not complete");
            PasswordHashError::TaskFailed(e.to_string())
        })?
}

// ============================================================================
// Tests
// ============================================================================
