use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

/// Environment variable holding the password for non-interactive use.
pub const PASSWORD_ENV: &str = "CREDKIT_PASSWORD";

/// Reads the password to check: `CREDKIT_PASSWORD`, then stdin or a prompt.
pub fn read_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = read_secret_line("Password: ")?;
    if pw.is_empty() {
        bail!("no password provided");
    }
    Ok(pw)
}

/// Reads a password to hash, asking twice when attached to a terminal.
pub fn read_new_password_with_confirmation() -> Result<Zeroizing<String>> {
    if password_from_env().is_some() || !io::stdin().is_terminal() {
        return read_password();
    }

    let pw1 = read_secret_line("New password: ")?;
    let pw2 = read_secret_line("Confirm password: ")?;

    if pw1.is_empty() {
        bail!("password cannot be empty");
    }
    if pw1 != pw2 {
        bail!("passwords do not match");
    }
    Ok(pw1)
}

/// Reads the text for `encrypt` when none is given on the command line.
pub fn read_text() -> Result<Zeroizing<String>> {
    read_secret_line("Text: ")
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// One line from piped stdin, or a hidden prompt on a terminal.
fn read_secret_line(prompt: &str) -> Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        return Ok(Zeroizing::new(rpassword::prompt_password(prompt)?));
    }

    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line)?;
    strip_line_ending(&mut line);
    Ok(line)
}

fn strip_line_ending(line: &mut String) {
    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
}
