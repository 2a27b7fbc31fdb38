use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use credkit::{Cipher, EncryptionKey};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the static encryption key.
pub const KEY_ENV: &str = "ENCRYPTION_KEY";

/// Loads `.env` from the working directory, if present.
///
/// Runs before logging is set up, so the caller reports the outcome.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("failed to read .env"),
    }
}

/// Sets up logging to stderr. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "credkit=debug",
        _ => "credkit=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the cipher from the configured key.
pub fn load_cipher(key: Option<&str>) -> Result<Cipher> {
    let Some(key) = key else {
        bail!("no encryption key: pass --key or set {KEY_ENV}");
    };

    let key: EncryptionKey = key
        .parse()
        .context("encryption key must be 32 characters or 64 hex digits")?;
    Ok(Cipher::new(key))
}
