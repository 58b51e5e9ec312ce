//! `avault encrypt` — encrypt plain files in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::output;
use crate::cli::{
    check_single_output, encrypt_header, load_settings, vault_password, write_result, Cli,
};
use crate::errors::{Result, VaultError};
use crate::vault::{self, Header};

/// Execute the `encrypt` command.
pub fn execute(
    cli: &Cli,
    files: &[PathBuf],
    output_path: Option<&Path>,
    label: Option<&str>,
) -> Result<()> {
    check_single_output(files, output_path)?;

    let settings = load_settings()?;
    let header = encrypt_header(label, &settings)?;
    let password = vault_password(cli, &settings, true)?;

    for file in files {
        encrypt_one(file, output_path, &header, &password)?;
        if output_path.is_none() {
            output::success(&format!("Encrypted {}", file.display()));
        }
    }

    Ok(())
}

fn encrypt_one(
    file: &Path,
    output_path: Option<&Path>,
    header: &Header,
    password: &str,
) -> Result<()> {
    let plaintext = fs::read(file)?;

    // Refuse to wrap a vault in a second vault, whatever its version.
    if std::str::from_utf8(&plaintext).is_ok_and(vault::is_vault_text) {
        return Err(VaultError::AlreadyEncrypted(file.to_path_buf()));
    }

    debug!(file = %file.display(), "encrypting");
    let mut envelope = vault::encrypt_with_header(header, &plaintext, password)?;
    envelope.push('\n');

    write_result(file, output_path, envelope.as_bytes())
}
