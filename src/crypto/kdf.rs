use crate::error::{CredError, Result};
use scrypt::Params;
use zeroize::Zeroizing;

use super::DERIVED_KEY_LEN;

/// Upper bound on the memory a single derivation may claim (256 MiB).
pub const MAX_MEMORY_BYTES: u64 = 256 * 1024 * 1024;

/// scrypt cost parameters.
///
/// The stored hash format does not record these, so hashing and verifying
/// must use the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    log_n: u8,
    r: u32,
    p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            // N = 16384
            log_n: 14,
            // block size
            r: 8,
            // parallelization
            p: 1,
        }
    }
}

impl KdfParams {
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self> {
        let params = Self { log_n, r, p };
        params.validate()?;
        Ok(params)
    }

    pub fn log_n(&self) -> u8 {
        self.log_n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    /// Memory needed by one derivation, in bytes: the V buffer (128 * r * N)
    /// plus the B buffer (128 * r * p) and one scratch block.
    pub fn memory_bytes(&self) -> u64 {
        let blocks = (1u64 << self.log_n.min(63))
            .saturating_add(u64::from(self.p))
            .saturating_add(1);
        128u64
            .saturating_mul(u64::from(self.r))
            .saturating_mul(blocks)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_n < 1 {
            return Err(CredError::Derivation("scrypt log_n must be >= 1".into()));
        }
        if self.log_n >= 64 {
            return Err(CredError::Derivation("scrypt log_n must be < 64".into()));
        }
        if self.r < 1 {
            return Err(CredError::Derivation("scrypt r must be >= 1".into()));
        }
        if self.p < 1 {
            return Err(CredError::Derivation("scrypt p must be >= 1".into()));
        }
        if self.memory_bytes() > MAX_MEMORY_BYTES {
            return Err(CredError::Derivation(format!(
                "scrypt parameters need {} bytes, limit is {MAX_MEMORY_BYTES}",
                self.memory_bytes()
            )));
        }
        Ok(())
    }

    fn to_scrypt(self) -> Result<Params> {
        self.validate()?;
        Params::new(self.log_n, self.r, self.p, DERIVED_KEY_LEN)
            .map_err(|e| CredError::Derivation(format!("invalid scrypt params: {e}")))
    }
}

/// Derive a 64-byte key from password and salt. Blocks for the duration of
/// the derivation.
pub fn derive_key(
    password: &str,
    salt: &[u8],
    kdf: KdfParams,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>> {
    let params = kdf.to_scrypt()?;

    tracing::trace!(
        log_n = kdf.log_n,
        r = kdf.r,
        p = kdf.p,
        "deriving scrypt key"
    );

    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut key[..])
        .map_err(|e| CredError::Derivation(format!("scrypt failed: {e}")))?;

    Ok(key)
}
