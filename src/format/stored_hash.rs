use std::fmt;
use std::str::FromStr;

use super::{decode_hex, serde_via_str, split_pair};
use crate::error::{CredError, Result};

/// A salted password hash as persisted by the caller.
///
/// The salt is kept as its hex text because that text, not the decoded
/// bytes, is what the key derivation consumes.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredHash {
    salt: String,
    derived_key: Vec<u8>,
}

impl StoredHash {
    pub fn new(salt: String, derived_key: Vec<u8>) -> Self {
        Self { salt, derived_key }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }
}

impl fmt::Display for StoredHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.salt,
            super::SEPARATOR,
            hex::encode(&self.derived_key)
        )
    }
}

// Debug output omits the salt and key.
impl fmt::Debug for StoredHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredHash")
            .field("salt_len", &self.salt.len())
            .field("derived_key_len", &self.derived_key.len())
            .finish()
    }
}

impl FromStr for StoredHash {
    type Err = CredError;

    /// Parses `salt:derivedKeyHex`.
    ///
    /// The salt is taken verbatim. The key length is not checked here; a
    /// key of the wrong length simply never verifies.
    fn from_str(s: &str) -> Result<Self> {
        let (salt, key_hex) = split_pair(s, "stored hash")?;
        let derived_key = decode_hex(key_hex, "stored hash key")?;
        Ok(Self::new(salt.to_string(), derived_key))
    }
}

serde_via_str!(StoredHash, "a stored hash of the form salt:hex");
