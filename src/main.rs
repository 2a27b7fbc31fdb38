use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
mod auth;
mod config;
use credkit::{DEFAULT_PASSWORD_LENGTH, KdfParams, PasswordHasher, generate_password};

#[derive(Debug, clap::Args)]
struct ScryptArgs {
    /// scrypt cost as log2(N) (default: 14)
    #[arg(long = "scrypt-log-n")]
    log_n: Option<u8>,

    /// scrypt block size r (default: 8)
    #[arg(long = "scrypt-r")]
    r: Option<u32>,

    /// scrypt parallelization p (default: 1)
    #[arg(long = "scrypt-p")]
    p: Option<u32>,
}

impl ScryptArgs {
    fn to_kdf_params(&self) -> Result<KdfParams> {
        let default = KdfParams::default();

        Ok(KdfParams::new(
            self.log_n.unwrap_or(default.log_n()),
            self.r.unwrap_or(default.r()),
            self.p.unwrap_or(default.p()),
        )?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "credkit")]
#[command(
    version,
    about = "Hash and verify passwords, encrypt text with a static key, generate passwords."
)]
struct Cli {
    /// Static encryption key: 32 characters or 64 hex digits
    #[arg(
        long,
        global = true,
        value_name = "KEY",
        env = "ENCRYPTION_KEY",
        hide_env_values = true
    )]
    key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints `salt:hash`
    Hash {
        #[command(flatten)]
        scrypt: ScryptArgs,
    },

    /// Verifies a password against a stored hash
    #[command(arg_required_else_help = true)]
    Verify {
        hash: String,

        #[command(flatten)]
        scrypt: ScryptArgs,
    },

    /// Encrypts text and prints `iv:ciphertext`
    Encrypt {
        /// Text to encrypt; read from stdin when omitted
        text: Option<String>,
    },

    /// Decrypts an `iv:ciphertext` envelope
    #[command(arg_required_else_help = true)]
    Decrypt { envelope: String },

    /// Generates a random password
    Generate {
        /// Number of characters
        #[arg(short, long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
        length: usize,

        /// Copy to the clipboard instead of printing
        #[arg(short, long, default_value_t = false)]
        copy: bool,
    },
}

fn main() -> Result<ExitCode> {
    let dotenv = config::load_dotenv();
    let args = Cli::parse();
    config::init_tracing(args.verbose);

    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(e) => tracing::warn!("{e:#}"),
    }

    match args.command {
        Commands::Hash { scrypt } => {
            let hasher = PasswordHasher::new(scrypt.to_kdf_params()?);
            let password = auth::read_new_password_with_confirmation()?;
            let stored = hasher.hash(&password).context("failed to hash password")?;
            println!("{stored}");
        }
        Commands::Verify { hash, scrypt } => {
            let hasher = PasswordHasher::new(scrypt.to_kdf_params()?);
            let password = auth::read_password()?;
            if hasher.verify(&password, &hash)? {
                println!("match");
            } else {
                println!("no match");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Encrypt { text } => {
            let cipher = config::load_cipher(args.key.as_deref())?;
            let envelope = match text {
                Some(text) => cipher.encrypt(&text)?,
                None => cipher.encrypt(&auth::read_text()?)?,
            };
            println!("{envelope}");
        }
        Commands::Decrypt { envelope } => {
            let cipher = config::load_cipher(args.key.as_deref())?;
            let plaintext = cipher.decrypt(&envelope)?;
            println!("{}", *plaintext);
        }
        Commands::Generate { length, copy } => {
            let password = generate_password(length)?;
            if copy {
                let mut clipboard =
                    arboard::Clipboard::new().context("clipboard is not available")?;
                clipboard.set_text(password.as_str())?;
                println!("password copied to clipboard");
            } else {
                println!("{}", *password);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
