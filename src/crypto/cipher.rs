//! AES-256-CBC text encryption under a static key.
//!
//! The key is supplied by the hosting process and injected at construction.
//! Every encryption draws a fresh IV, which travels with the ciphertext in
//! the [`Envelope`].

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{BLOCK_LEN, IV_LEN, KEY_LEN, random_array};
use crate::error::{CredError, Result};
use crate::format::Envelope;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// A 256-bit static encryption key, cleared from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds a key from a slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            CredError::Encryption(format!(
                "key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}

impl FromStr for EncryptionKey {
    type Err = CredError;

    /// Accepts either 32 raw characters, used as their bytes, or 64 hex digits.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() == KEY_LEN * 2 {
            if let Ok(bytes) = hex::decode(s) {
                let bytes = Zeroizing::new(bytes);
                return Self::from_slice(&bytes);
            }
        }
        Self::from_slice(s.as_bytes())
    }
}

/// Encrypts and decrypts text under one static key.
#[derive(Clone, Debug)]
pub struct Cipher {
    key: EncryptionKey,
}

impl Cipher {
    pub fn new(key: EncryptionKey) -> Self {
        Self { key }
    }

    pub fn from_slice(key: &[u8]) -> Result<Self> {
        Ok(Self::new(EncryptionKey::from_slice(key)?))
    }

    /// Encrypts UTF-8 text under a fresh random IV.
    pub fn encrypt(&self, plaintext: &str) -> Result<Envelope> {
        let iv = random_array::<IV_LEN>()?;

        let ciphertext = Aes256CbcEnc::new_from_slices(self.key.as_bytes(), &iv)
            .map_err(|e| CredError::Encryption(format!("cipher setup failed: {e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        tracing::debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "text encrypted"
        );
        Ok(Envelope::new(iv, ciphertext))
    }

    /// Decrypts the wire form `ivHex:ciphertextHex`.
    ///
    /// Every failure, including a malformed envelope, is reported as the same
    /// `Decryption` error.
    pub fn decrypt(&self, envelope: &str) -> Result<Zeroizing<String>> {
        let envelope: Envelope = envelope.parse().map_err(|_| CredError::Decryption)?;
        self.decrypt_envelope(&envelope)
    }

    pub fn decrypt_envelope(&self, envelope: &Envelope) -> Result<Zeroizing<String>> {
        let ciphertext = envelope.ciphertext();
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CredError::Decryption);
        }

        let plaintext = Aes256CbcDec::new_from_slices(self.key.as_bytes(), envelope.iv())
            .map_err(|_| CredError::Decryption)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map(Zeroizing::new)
            .map_err(|_| CredError::Decryption)?;

        let text = std::str::from_utf8(&plaintext).map_err(|_| CredError::Decryption)?;

        tracing::debug!(ciphertext_len = ciphertext.len(), "text decrypted");
        Ok(Zeroizing::new(text.to_owned()))
    }
}

/// Encrypt text with a raw key; fails with `Encryption` unless the key is 32 bytes
pub fn encrypt(plaintext: &str, key: &[u8]) -> Result<String> {
    Ok(Cipher::from_slice(key)?.encrypt(plaintext)?.to_string())
}

/// Decrypt an envelope with a raw key
pub fn decrypt(envelope: &str, key: &[u8]) -> Result<Zeroizing<String>> {
    Cipher::from_slice(key)?.decrypt(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &[u8; 32] = b"a-key-with-exactly-32-characters";
    const FIXED_IV: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    fn cipher() -> Cipher {
        Cipher::new(EncryptionKey::from_bytes(*TEST_KEY))
    }

    #[test]
    fn roundtrip_password() {
        let c = cipher();
        let env = c.encrypt("Password42!").unwrap();
        assert_eq!(*c.decrypt(&env.to_string()).unwrap(), "Password42!");
    }

    #[test]
    fn decrypts_known_vector() {
        let wire = "000102030405060708090a0b0c0d0e0f:b6f3b9bcaf9e8a3058e741fc338c47bc";
        assert_eq!(*cipher().decrypt(wire).unwrap(), "Password42!");

        let empty = "000102030405060708090a0b0c0d0e0f:58e16badaafb51da67533959f7d2bec7";
        assert_eq!(*cipher().decrypt(empty).unwrap(), "");
    }

    #[test]
    fn known_vector_ciphertext_matches() {
        let env: Envelope = "000102030405060708090a0b0c0d0e0f:b6f3b9bcaf9e8a3058e741fc338c47bc"
            .parse()
            .unwrap();
        let ct = Aes256CbcEnc::new_from_slices(TEST_KEY, &FIXED_IV)
            .unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(b"Password42!");
        assert_eq!(ct, env.ciphertext());
    }

    #[test]
    fn envelope_shape() {
        let env = cipher().encrypt("x".repeat(33).as_str()).unwrap().to_string();
        let (iv, ct) = env.split_once(':').unwrap();
        assert_eq!(iv.len(), 32);
        assert_eq!(ct.len(), 3 * 32);
    }

    #[test]
    fn ivs_are_unique() {
        let c = cipher();
        let a = c.encrypt("same").unwrap();
        let b = c.encrypt("same").unwrap();
        assert_ne!(a.iv(), b.iv());
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn key_length_is_checked() {
        assert!(matches!(
            Cipher::from_slice(&[0u8; 31]),
            Err(CredError::Encryption(_))
        ));
        assert!(matches!(
            encrypt("text", &[0u8; 33]),
            Err(CredError::Encryption(_))
        ));
    }

    #[test]
    fn key_parses_raw_or_hex() {
        let raw: EncryptionKey = "a-key-with-exactly-32-characters".parse().unwrap();
        assert_eq!(raw.as_bytes(), TEST_KEY);

        let hexed: EncryptionKey = hex::encode(TEST_KEY).parse().unwrap();
        assert_eq!(hexed.as_bytes(), TEST_KEY);

        assert!("too-short".parse::<EncryptionKey>().is_err());
    }

    #[test]
    fn key_debug_is_redacted() {
        let key = EncryptionKey::from_bytes(*TEST_KEY);
        assert!(!format!("{key:?}").contains("a-key"));
        assert!(!format!("{:?}", cipher()).contains("a-key"));
    }

    #[test]
    fn malformed_envelopes_are_opaque() {
        let c = cipher();
        let cases = [
            "000102030405060708090a0b0c0d0e0fb6f3b9bcaf9e8a3058e741fc338c47bc".to_string(),
            "0001:b6f3b9bcaf9e8a3058e741fc338c47bc".to_string(),
            "000102030405060708090a0b0c0d0e0f:b6f3b9".to_string(),
            "000102030405060708090a0b0c0d0e0f:".to_string(),
            "000102030405060708090a0b0c0d0e0f:zz".to_string(),
        ];
        for case in cases {
            assert_eq!(c.decrypt(&case).unwrap_err(), CredError::Decryption, "{case}");
        }
    }

    #[test]
    fn wrong_key_fails() {
        let env = cipher().encrypt("Password42!").unwrap().to_string();
        let other = Cipher::new(EncryptionKey::from_bytes([9u8; 32]));
        assert_eq!(other.decrypt(&env).unwrap_err(), CredError::Decryption);
    }

    #[test]
    fn free_functions_roundtrip() {
        let env = encrypt("héllo wörld", TEST_KEY).unwrap();
        assert_eq!(*decrypt(&env, TEST_KEY).unwrap(), "héllo wörld");
    }
}
