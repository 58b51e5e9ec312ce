//! CLI module — Clap argument parser, password sources, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::Header;

/// Environment variable holding the vault password (CI/CD).
pub const PASSWORD_ENV: &str = "AVAULT_PASSWORD";

/// Environment variable holding the new password for `rekey`.
pub const NEW_PASSWORD_ENV: &str = "AVAULT_NEW_PASSWORD";

/// Output path meaning "write to stdout".
const STDOUT_PATH: &str = "-";

/// avault CLI: Ansible Vault compatible file encryption.
#[derive(Parser)]
#[command(
    name = "avault",
    about = "Encrypt and decrypt Ansible Vault files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// File containing the vault password
    #[arg(long, global = true)]
    pub vault_password_file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt files in place
    Encrypt {
        /// Files to encrypt
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the result here instead ("-" for stdout, single file only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vault label written into the header
        #[arg(long)]
        label: Option<String>,
    },

    /// Decrypt files in place
    Decrypt {
        /// Files to decrypt
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the result here instead ("-" for stdout, single file only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the decrypted contents of a vault file
    View {
        /// Vault file to show
        file: PathBuf,
    },

    /// Re-encrypt files with a new password
    Rekey {
        /// Files to re-encrypt
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Encrypt a single value for embedding in a YAML file
    EncryptString {
        /// Value to encrypt (read from stdin or prompted when omitted)
        value: Option<String>,

        /// YAML key to emit in front of the encrypted block
        #[arg(short, long)]
        name: Option<String>,

        /// Vault label written into the header
        #[arg(long)]
        label: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.avault.toml` from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Get the vault password, trying in order:
/// 1. `AVAULT_PASSWORD` env var (CI/CD)
/// 2. `--vault-password-file`
/// 3. `vault_password_file` from `.avault.toml`
/// 4. Interactive prompt (with confirmation when `confirm` is set)
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn vault_password(cli: &Cli, settings: &Settings, confirm: bool) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let file = cli
        .vault_password_file
        .as_deref()
        .or(settings.vault_password_file.as_deref());
    if let Some(path) = file {
        return read_password_file(path);
    }

    if confirm {
        prompt_with_confirmation("New vault password", "Confirm new vault password")
    } else {
        let pw = dialoguer::Password::new()
            .with_prompt("Vault password")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
        Ok(Zeroizing::new(pw))
    }
}

/// Get the replacement password for `rekey`.
///
/// Respects `AVAULT_NEW_PASSWORD` for scripted usage.
pub fn new_vault_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(NEW_PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    prompt_with_confirmation("New vault password", "Confirm new vault password")
}

fn prompt_with_confirmation(prompt: &str, confirmation: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation(confirmation, "Passwords do not match, try again")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Read a password file, dropping trailing line breaks.
pub fn read_password_file(path: &Path) -> Result<Zeroizing<String>> {
    let contents = Zeroizing::new(fs::read_to_string(path)?);
    let password = contents.trim_end_matches(['\r', '\n']);
    Ok(Zeroizing::new(password.to_string()))
}

/// Header for newly encrypted content: `--label`, then the configured
/// label, then no label.
pub fn encrypt_header(label: Option<&str>, settings: &Settings) -> Result<Header> {
    match label.or(settings.encrypt_label.as_deref()) {
        Some(label) => Header::with_label(label),
        None => Ok(Header::default()),
    }
}

/// Reject `--output` with more than one input file.
pub fn check_single_output(files: &[PathBuf], output: Option<&Path>) -> Result<()> {
    if output.is_some() && files.len() > 1 {
        return Err(VaultError::CommandFailed(
            "--output can only be used with a single input file".into(),
        ));
    }
    Ok(())
}

/// Write `contents` to `output` ("-" means stdout), or atomically replace
/// `input` when no output was given.
pub fn write_result(input: &Path, output: Option<&Path>, contents: &[u8]) -> Result<()> {
    match output {
        Some(path) if path == Path::new(STDOUT_PATH) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents)?;
            stdout.flush()?;
            Ok(())
        }
        Some(path) => crate::vault::store::write_atomic(path, contents),
        None => crate::vault::store::write_atomic(input, contents),
    }
}

/// Read piped stdin, or return `None` when stdin is a terminal.
pub fn read_piped_stdin() -> Result<Option<String>> {
    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(Some(buf))
}
