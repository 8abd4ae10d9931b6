/**
 * Password Hashing
 *
 * One-way, salted password hashing. Only digests are ever stored; the
 * plaintext passes through `hash` and `verify` and is dropped.
 */

use crate::backend::error::BackendError;

/// Hash and verify plaintext passwords
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest. Two calls with the same input differ.
    fn hash(&self, plaintext: &str) -> Result<String, BackendError>;

    /// Check a plaintext against a digest. A malformed digest is a mismatch.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// bcrypt-based hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, BackendError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            BackendError::internal(format!("Failed to hash password: {e}"))
        })
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!("Password digest could not be checked: {}", e);
                false
            }
        }
    }
}
