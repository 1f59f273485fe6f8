use anyhow::{Context, Result};
use std::path::Path;

/// Ask for the PKCS#12 passphrase on the terminal without echoing it.
pub fn prompt_passphrase(cert: &Path) -> Result<String> {
    rpassword::prompt_password(format!("Enter passphrase for {}: ", cert.display())).context("Error reading passphrase")
}
