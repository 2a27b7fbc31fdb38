//! Cryptographic primitives for credential handling.
//!
//! Provides password hashing, static-key text encryption and random
//! password generation.

pub mod cipher;
pub mod hasher;
pub mod kdf;
pub mod password;

pub use cipher::{Cipher, EncryptionKey, decrypt, encrypt};
pub use hasher::{PasswordHasher, hash_password, verify_password};
pub use kdf::{KdfParams, derive_key};
pub use password::{generate_default_password, generate_password};

use crate::error::{CredError, Result};
use getrandom::fill;

/// Length of the random salt (8 bytes, 16 hex characters).
pub const SALT_LEN: usize = 8;
/// Length of the AES-CBC initialization vector (16 bytes).
pub const IV_LEN: usize = 16;
/// Length of the static encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the scrypt output stored in a hash (64 bytes).
pub const DERIVED_KEY_LEN: usize = 64;
/// AES block size (16 bytes).
pub const BLOCK_LEN: usize = 16;
/// Default length of a generated password.
pub const DEFAULT_PASSWORD_LENGTH: usize = 24;
/// Upper bound on a generated password's length.
pub const MAX_PASSWORD_LENGTH: usize = 4096;
/// Characters a generated password is drawn from (69 symbols).
pub const PASSWORD_ALPHABET: &[u8; 69] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@-_#$*";

/// Fill buffer with cryptographically secure random bytes
pub(crate) fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|e| CredError::Randomness(e.to_string()))
}

/// Generate an array of random bytes
pub(crate) fn random_array<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    secure_random(&mut bytes)?;
    Ok(bytes)
}
