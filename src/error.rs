//! Error taxonomy shared by every credkit operation.

use thiserror::Error;

/// Result alias for credkit operations.
pub type Result<T> = std::result::Result<T, CredError>;

/// Errors returned by the hasher, the cipher and the password generator.
///
/// None of these are retried internally. Every variant is a local,
/// recoverable failure that the caller maps onto its own credential flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredError {
    /// The key derivation function rejected its parameters or failed.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// A stored hash or envelope is missing its required structure.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Decryption failed. Carries no detail so failures cannot act as an oracle.
    #[error("decryption failed")]
    Decryption,

    /// Encryption could not be set up, usually a key of the wrong length.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// A password of non-positive length was requested.
    #[error("invalid password length: {0}")]
    InvalidLength(usize),

    /// The OS random generator is unavailable.
    #[error("OS random generator unavailable: {0}")]
    Randomness(String),
}
