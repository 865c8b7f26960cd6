//! Password hashing with argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so
//! verification reads its parameters from the stored value and old hashes keep
//! verifying after the configured cost changes.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// One-way password hashing.
pub trait CredentialHasher: Send + Sync {
    /// Salted hash of `password`.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Whether `password` matches `hash`. A malformed hash is a mismatch.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self { params: Params::default() }
    }
}

impl Argon2Hasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Build from explicit costs (memory in KiB, passes, lanes).
    pub fn with_costs(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::Configuration(format!("argon2 params: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2().verify_password(password.as_bytes(), &parsed).is_ok()
    }
}

/// Run [`CredentialHasher::hash`] on the blocking pool.
pub async fn hash_blocking(hasher: Arc<dyn CredentialHasher>, password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Hash(format!("hashing task failed: {e}")))?
}

/// Run [`CredentialHasher::verify`] on the blocking pool.
pub async fn verify_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
    hash: String,
) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AuthError::Hash(format!("verification task failed: {e}")))
}
