//! Argon2id password hasher.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=…,t=…,p=…$salt$hash`),
//! so parameters travel with each hash and can be raised without a migration.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::value_objects::{Password, PasswordHash};

/// [`PasswordHasher`] using Argon2id with the crate's default parameters and
/// a random per-password salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn password() -> Password {
        Password::new("Tr4ce!Kite").expect("valid password")
    }

    #[rstest]
    fn hash_verifies_only_the_original(password: Password) {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash(&password).expect("hashes");

        assert!(hasher.verify(&password, &hash).expect("well formed"));
        let other = Password::new("Other!pass9").expect("valid password");
        assert!(!hasher.verify(&other, &hash).expect("well formed"));
    }

    #[rstest]
    fn hashes_are_salted_phc_strings(password: Password) {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash(&password).expect("hashes");
        let second = hasher.hash(&password).expect("hashes");

        assert!(first.as_str().starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.as_str().contains("Tr4ce"));
    }

    #[rstest]
    #[case("no-separator")]
    #[case("salt$digest")]
    fn malformed_hashes_are_errors(password: Password, #[case] encoded: &str) {
        let error = Argon2PasswordHasher
            .verify(&password, &PasswordHash::new(encoded))
            .expect_err("malformed");
        assert!(matches!(error, PasswordHasherError::MalformedHash { .. }));
    }
}
