use zeroize::Zeroizing;

use super::{DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, PASSWORD_ALPHABET, secure_random};
use crate::error::{CredError, Result};

/// Generates a random password of `length` characters.
///
/// Each character is a random `u32` reduced modulo the alphabet size. The
/// resulting bias (2^32 mod 69 != 0) is negligible.
///
/// # Errors
///
/// Returns `InvalidLength` for a zero length or one above
/// [`MAX_PASSWORD_LENGTH`], and `Randomness` if the OS random generator fails.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 || length > MAX_PASSWORD_LENGTH {
        return Err(CredError::InvalidLength(length));
    }

    let mut raw = Zeroizing::new(vec![0u8; length * 4]);
    secure_random(&mut raw)?;

    let password: String = raw
        .chunks_exact(4)
        .map(|chunk| {
            let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            PASSWORD_ALPHABET[value as usize % PASSWORD_ALPHABET.len()] as char
        })
        .collect();

    tracing::debug!(length, "password generated");
    Ok(Zeroizing::new(password))
}

/// Generates a password of the default length (24).
pub fn generate_default_password() -> Result<Zeroizing<String>> {
    generate_password(DEFAULT_PASSWORD_LENGTH)
}
