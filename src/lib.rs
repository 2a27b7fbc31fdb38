//! Credential primitives for an authentication layer.
//!
//! - [`PasswordHasher`]: salted scrypt hashes (`salt:derivedKeyHex`) and
//!   constant-time verification.
//! - [`Cipher`]: AES-256-CBC encryption of text under a static 32-byte key,
//!   producing `ivHex:ciphertextHex` envelopes.
//! - [`generate_password`]: random passwords over a 69-character alphabet.
//!
//! All operations are stateless and safe to call from many threads. Hashing
//! and verification block for the length of one scrypt derivation, so async
//! callers should run them on a blocking pool.
//!
//! ```no_run
//! use credkit::{Cipher, EncryptionKey, hash_password, verify_password};
//!
//! let stored = hash_password("Password42!")?.to_string();
//! assert!(verify_password("Password42!", &stored)?);
//!
//! let cipher = Cipher::new(EncryptionKey::from_bytes(*b"a-key-with-exactly-32-characters"));
//! let envelope = cipher.encrypt("Password42!")?.to_string();
//! assert_eq!(*cipher.decrypt(&envelope)?, "Password42!");
//! # Ok::<(), credkit::CredError>(())
//! ```

mod crypto;
mod error;
mod format;

pub use crate::crypto::kdf::MAX_MEMORY_BYTES;
pub use crate::crypto::{
    Cipher, DEFAULT_PASSWORD_LENGTH, DERIVED_KEY_LEN, EncryptionKey, IV_LEN, KEY_LEN, KdfParams,
    MAX_PASSWORD_LENGTH, PASSWORD_ALPHABET, PasswordHasher, SALT_LEN, decrypt, derive_key, encrypt,
    generate_default_password, generate_password, hash_password, verify_password,
};
pub use crate::error::{CredError, Result};
pub use crate::format::{Envelope, SEPARATOR, StoredHash, split_pair};
