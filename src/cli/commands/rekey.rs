//! `avault rekey` — re-encrypt vault files with a new password.
//!
//! Every file is decrypted with the current password and encrypted again
//! under the new one with a fresh salt. Labels are kept. Files are only
//! written once their new envelope has been built, and each write is
//! atomic.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::cli::output;
use crate::cli::{load_settings, new_vault_password, vault_password, Cli};
use crate::errors::Result;
use crate::vault;
use crate::vault::store::write_atomic;

/// Execute the `rekey` command.
pub fn execute(cli: &Cli, files: &[PathBuf]) -> Result<()> {
    let settings = load_settings()?;
    let old_password = vault_password(cli, &settings, false)?;
    let new_password = new_vault_password()?;

    for file in files {
        let envelope = fs::read_to_string(file)?;

        debug!(file = %file.display(), "rekeying");
        let mut rekeyed = vault::rekey(&envelope, &old_password, &new_password)?;
        rekeyed.push('\n');

        write_atomic(file, rekeyed.as_bytes())?;
        output::success(&format!("Rekeyed {}", file.display()));
    }

    Ok(())
}
