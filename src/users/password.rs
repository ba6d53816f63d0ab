use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{Error, Result};

/// Shortest password accepted at registration and update.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext credential with Argon2id and a fresh salt. Only
/// the resulting hash ever reaches storage.
pub fn hash(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash failure");
            Error::Internal(anyhow::anyhow!(e.to_string()))
        })?
        .to_string();
    Ok(hash)
}

/// Check a plaintext credential against a stored hash.
pub fn verify(plain: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        Error::Internal(anyhow::anyhow!(e.to_string()))
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hashed = hash(password).expect("hashing should succeed");
        assert_ne!(hashed, password);
        assert!(verify(password, &hashed).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hashed = hash(password).expect("hashing should succeed");
        assert!(!verify("wrong-password", &hashed).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify("anything", "not-a-valid-hash").unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let a = hash("hunter22hunter22").unwrap();
        let b = hash("hunter22hunter22").unwrap();
        assert_ne!(a, b); // fresh salt per call
    }
}
