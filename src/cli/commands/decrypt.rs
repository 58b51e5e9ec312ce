//! `avault decrypt` — decrypt vault files in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{check_single_output, load_settings, vault_password, write_result, Cli};
use crate::errors::Result;
use crate::vault;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, files: &[PathBuf], output_path: Option<&Path>) -> Result<()> {
    check_single_output(files, output_path)?;

    let settings = load_settings()?;
    let password = vault_password(cli, &settings, false)?;

    for file in files {
        let envelope = fs::read_to_string(file)?;

        debug!(file = %file.display(), "decrypting");
        let plaintext = Zeroizing::new(vault::decrypt_bytes(&envelope, &password)?);

        write_result(file, output_path, &plaintext)?;
        if output_path.is_none() {
            output::success(&format!("Decrypted {}", file.display()));
        }
    }

    Ok(())
}
