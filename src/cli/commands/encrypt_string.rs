//! `avault encrypt-string` — encrypt one value as a YAML `!vault` block.
//!
//! Output looks like:
//!
//! ```text
//! db_password: !vault |
//!           $ANSIBLE_VAULT;1.1;AES256
//!           3961...
//! ```

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{encrypt_header, load_settings, read_piped_stdin, vault_password, Cli};
use crate::errors::{Result, VaultError};
use crate::vault;

/// Indentation of the envelope lines inside the YAML block scalar.
const INDENT: &str = "          ";

/// Execute the `encrypt-string` command.
pub fn execute(
    cli: &Cli,
    value: Option<&str>,
    name: Option<&str>,
    label: Option<&str>,
) -> Result<()> {
    // Determine the value from one of three sources.
    let plaintext = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if let Some(piped) = read_piped_stdin()? {
        // Source 2: Piped input.
        Zeroizing::new(piped.trim_end_matches(['\r', '\n']).to_string())
    } else {
        // Source 3: Interactive secure prompt.
        let v = dialoguer::Password::new()
            .with_prompt("String to encrypt")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(v)
    };

    let settings = load_settings()?;
    let header = encrypt_header(label, &settings)?;
    let password = vault_password(cli, &settings, true)?;

    let envelope = vault::encrypt_with_header(&header, plaintext.as_bytes(), &password)?;
    println!("{}", yaml_block(name, &envelope));

    Ok(())
}

/// Render an envelope as an indented `!vault |` block scalar.
fn yaml_block(name: Option<&str>, envelope: &str) -> String {
    let mut out = match name {
        Some(name) => format!("{name}: !vault |"),
        None => "!vault |".to_string(),
    };

    for line in envelope.lines() {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(line);
    }

    out
}
