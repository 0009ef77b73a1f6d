use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

/// Password hashing with Argon2id and a fresh salt per call.
/// The output is a PHC string, so the salt travels with the hash.
#[derive(Default)]
pub struct HashManager {
    argon2: Argon2<'static>,
}

impl HashManager {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal_server_error("Failed to process password")
            })
    }

    /// Malformed hashes never match
    pub fn compare(&self, plaintext: &str, hashed: &str) -> bool {
        match PasswordHash::new(hashed) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}
