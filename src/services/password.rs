//! Salted password derivation for stored credentials.
//!
//! Each credential carries its own salt and work factor. The work factor is
//! used as the Argon2id time cost so it can be raised for new records without
//! invalidating old ones.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Invalid iteration count: {0}")]
    InvalidIterations(i64),
    #[error("Salt is not valid hex: {0}")]
    InvalidSalt(#[from] hex::FromHexError),
    #[error("Hash derivation failed: {0}")]
    Derivation(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Generates a fresh hex-encoded salt.
    pub fn generate_salt(&self) -> String {
        let mut bytes = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Derives the hex-encoded hash of `password` for the given salt and work factor.
    pub fn derive(&self, password: &str, salt: &str, iterations: i64) -> Result<String, PasswordError> {
        let t_cost = u32::try_from(iterations)
            .ok()
            .filter(|t| *t > 0)
            .ok_or(PasswordError::InvalidIterations(iterations))?;
        let salt_bytes = hex::decode(salt)?;

        let params = Params::new(Params::DEFAULT_M_COST, t_cost, Params::DEFAULT_P_COST, Some(HASH_LEN))
            .map_err(|e| PasswordError::Derivation(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut output = [0u8; HASH_LEN];
        argon2
            .hash_password_into(password.as_bytes(), &salt_bytes, &mut output)
            .map_err(|e| PasswordError::Derivation(e.to_string()))?;

        Ok(hex::encode(output))
    }

    /// Checks `password` against a stored hash. Any derivation failure counts as a mismatch.
    pub fn verify(&self, password: &str, stored_hash: &str, salt: &str, iterations: i64) -> bool {
        let Ok(expected) = hex::decode(stored_hash) else {
            return false;
        };

        match self.derive(password, salt, iterations).map(hex::decode) {
            Ok(Ok(actual)) => constant_time_eq(&actual, &expected),
            _ => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic_for_same_salt() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();

        let first = hasher.derive("correct horse", &salt, 2).unwrap();
        let second = hasher.derive("correct horse", &salt, 2).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), HASH_LEN * 2);
    }

    #[test]
    fn test_salt_and_iterations_change_the_hash() {
        let hasher = PasswordHasher::new();
        let salt_a = hasher.generate_salt();
        let salt_b = hasher.generate_salt();

        let base = hasher.derive("password123", &salt_a, 1).unwrap();
        assert_ne!(base, hasher.derive("password123", &salt_b, 1).unwrap());
        assert_ne!(base, hasher.derive("password123", &salt_a, 2).unwrap());
    }

    #[test]
    fn test_verify() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();
        let stored = hasher.derive("password123", &salt, 1).unwrap();

        assert!(hasher.verify("password123", &stored, &salt, 1));
        assert!(!hasher.verify("password124", &stored, &salt, 1));
        assert!(!hasher.verify("password123", &stored, &salt, 2));
    }

    #[test]
    fn test_verify_rejects_malformed_records() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();

        assert!(!hasher.verify("password123", "not-hex", &salt, 1));
        assert!(!hasher.verify("password123", "abcd", "zz", 1));
        assert!(!hasher.verify("password123", "abcd", &salt, 0));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();

        assert!(matches!(
            hasher.derive("password123", &salt, 0),
            Err(PasswordError::InvalidIterations(0))
        ));
    }
}
