//! Salted scrypt password hashing and constant-time verification.

use subtle::ConstantTimeEq;

use super::kdf::{KdfParams, derive_key};
use super::{SALT_LEN, random_array};
use crate::error::Result;
use crate::format::StoredHash;

/// Hashes and verifies passwords with a fixed set of scrypt parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    kdf: KdfParams,
}

impl PasswordHasher {
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf }
    }

    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    /// Hashes a password under a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `Derivation` if scrypt fails, `Randomness` if no salt can be drawn.
    pub fn hash(&self, password: &str) -> Result<StoredHash> {
        let salt = hex::encode(random_array::<SALT_LEN>()?);
        let key = derive_key(password, salt.as_bytes(), self.kdf)?;

        tracing::debug!("password hashed");
        Ok(StoredHash::new(salt, key.to_vec()))
    }

    /// Verifies a password against the wire form of a stored hash.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `stored` has no separator or its key is not
    /// hex, and `Derivation` if scrypt fails.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool> {
        let stored: StoredHash = stored.parse()?;
        self.verify_hash(password, &stored)
    }

    /// Verifies a password against an already parsed stored hash.
    pub fn verify_hash(&self, password: &str, stored: &StoredHash) -> Result<bool> {
        let derived = derive_key(password, stored.salt().as_bytes(), self.kdf)?;
        let expected = stored.derived_key();

        if expected.len() != derived.len() {
            tracing::debug!(
                expected = expected.len(),
                derived = derived.len(),
                "stored hash key has unexpected length"
            );
            return Ok(false);
        }

        let matched: bool = derived.as_slice().ct_eq(expected).into();
        tracing::debug!(matched, "password verified");
        Ok(matched)
    }
}

/// Hash a password with default parameters
pub fn hash_password(password: &str) -> Result<StoredHash> {
    PasswordHasher::default().hash(password)
}

/// Verify a password against a stored hash with default parameters
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    PasswordHasher::default().verify(password, stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DERIVED_KEY_LEN;
    use crate::error::CredError;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(KdfParams::new(4, 8, 1).unwrap())
    }

    #[test]
    fn hash_then_verify() {
        let h = hasher();
        let stored = h.hash("Password42!").unwrap();

        assert!(h.verify("Password42!", &stored.to_string()).unwrap());
        assert!(!h.verify("password42!", &stored.to_string()).unwrap());
    }

    #[test]
    fn hash_has_expected_shape() {
        let stored = hasher().hash("pw").unwrap().to_string();
        let (salt, key) = stored.split_once(':').unwrap();

        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(key.len(), DERIVED_KEY_LEN * 2);
        assert!(stored.chars().all(|c| c == ':' || c.is_ascii_hexdigit()));
        assert!(!stored.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn salts_are_unique() {
        let h = hasher();
        let a = h.hash("same").unwrap();
        let b = h.hash("same").unwrap();

        assert_ne!(a, b);
        assert!(h.verify_hash("same", &a).unwrap());
        assert!(h.verify_hash("same", &b).unwrap());
    }

    #[test]
    fn verify_known_stored_hash() {
        let stored = "0011223344556677:\
            7d737b32c8454e817a14d128febcb0adbf04760d84db14a13927d32e0ad6add3\
            f0bbd9d2e4332ffa12d570de23791130264b62c02b2188cf2bc61ff2caea5775";

        assert!(verify_password("Password42!", stored).unwrap());
        assert!(!verify_password("password42!", stored).unwrap());
    }

    #[test]
    fn uppercase_key_hex_still_verifies() {
        let h = hasher();
        let stored = h.hash("pw").unwrap().to_string();
        let (salt, key) = stored.split_once(':').unwrap();
        let upper = format!("{salt}:{}", key.to_uppercase());

        assert!(h.verify("pw", &upper).unwrap());
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = hasher().verify("pw", "0011223344556677").unwrap_err();
        assert!(matches!(err, CredError::MalformedInput(_)));
    }

    #[test]
    fn short_key_is_a_mismatch() {
        assert!(!hasher().verify("pw", "0011223344556677:abcd").unwrap());
        assert!(!hasher().verify("pw", "0011223344556677:").unwrap());
    }

    #[test]
    fn different_params_do_not_verify() {
        let stored = hasher().hash("pw").unwrap();
        let other = PasswordHasher::new(KdfParams::new(5, 8, 1).unwrap());
        assert!(!other.verify_hash("pw", &stored).unwrap());
    }

    #[test]
    fn empty_password_hashes() {
        let h = hasher();
        let stored = h.hash("").unwrap();
        assert!(h.verify_hash("", &stored).unwrap());
        assert!(!h.verify_hash(" ", &stored).unwrap());
    }
}
