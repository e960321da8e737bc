//! Credential hashing
//!
//! Secrets (PINs, passwords) are never stored; only a salted one-way hash
//! is. The hash is kept in PHC string format with the salt embedded, so a
//! stored credential is self-describing and survives parameter changes.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Salted argon2id hash of an account secret, in PHC string format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Hash a secret with a freshly generated random salt
    pub fn derive(secret: &str) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| Error::Credential(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Check a secret against the stored hash
    ///
    /// Never errors: a malformed stored hash, an empty secret, or a mismatch
    /// all come back as `false`.
    pub fn verify(&self, secret: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// The PHC string as stored on disk
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
