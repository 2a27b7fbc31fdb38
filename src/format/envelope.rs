use std::fmt;
use std::str::FromStr;

use super::{decode_hex, serde_via_str, split_pair};
use crate::crypto::IV_LEN;
use crate::error::{CredError, Result};

/// An encrypted text: the IV it was encrypted under plus the ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(iv: [u8; IV_LEN], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.iv),
            super::SEPARATOR,
            hex::encode(&self.ciphertext)
        )
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("iv", &hex::encode(self.iv))
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl FromStr for Envelope {
    type Err = CredError;

    /// Parses `ivHex:ciphertextHex`.
    ///
    /// Block alignment of the ciphertext is left to the cipher.
    fn from_str(s: &str) -> Result<Self> {
        let (iv_hex, ct_hex) = split_pair(s, "envelope")?;

        let iv: [u8; IV_LEN] = decode_hex(iv_hex, "envelope iv")?
            .try_into()
            .map_err(|v: Vec<u8>| {
                CredError::MalformedInput(format!(
                    "envelope iv must be {IV_LEN} bytes, got {}",
                    v.len()
                ))
            })?;
        let ciphertext = decode_hex(ct_hex, "envelope ciphertext")?;

        Ok(Self::new(iv, ciphertext))
    }
}

serde_via_str!(Envelope, "an envelope of the form ivHex:ciphertextHex");
