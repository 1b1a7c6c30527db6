//! Password hashing with Argon2; bcrypt hashes from the legacy user tables
//! still verify.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Verification failed")]
    VerificationFailed,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if Self::is_bcrypt(hash) {
            return bcrypt::verify(password, hash).map_err(|e| PasswordError::HashError(e.to_string()));
        }
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// True for hashes that should be replaced with Argon2 on next login.
    pub fn needs_rehash(hash: &str) -> bool {
        Self::is_bcrypt(hash)
    }

    fn is_bcrypt(hash: &str) -> bool {
        ["$2a$", "$2b$", "$2x$", "$2y$"].iter().any(|p| hash.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_roundtrip() {
        let hash = PasswordService::hash("frames-2024").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(PasswordService::verify("frames-2024", &hash).unwrap());
        assert!(!PasswordService::verify("frames-2025", &hash).unwrap());
        assert!(!PasswordService::needs_rehash(&hash));
    }

    #[test]
    fn test_legacy_bcrypt_hash_verifies() {
        let legacy = bcrypt::hash("secret1", 4).unwrap();
        assert!(PasswordService::verify("secret1", &legacy).unwrap());
        assert!(!PasswordService::verify("secret2", &legacy).unwrap());
        assert!(PasswordService::needs_rehash(&legacy));
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(PasswordService::verify("x", "not-a-hash").is_err());
    }
}
