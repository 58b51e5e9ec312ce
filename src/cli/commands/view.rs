//! `avault view` — print the decrypted contents of a vault file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::{load_settings, vault_password, Cli};
use crate::errors::Result;
use crate::vault;

/// Execute the `view` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    let settings = load_settings()?;
    let password = vault_password(cli, &settings, false)?;

    let envelope = fs::read_to_string(file)?;
    let plaintext = Zeroizing::new(vault::decrypt_bytes(&envelope, &password)?);

    // Nothing but the plaintext goes to stdout.
    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.flush()?;

    Ok(())
}
