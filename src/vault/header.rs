//! The envelope's first line.
//!
//! ```text
//! $ANSIBLE_VAULT;1.1;AES256[;LABEL]
//! ```
//!
//! Several versions are *recognized* so they can be rejected with a clear
//! message, but only the pairs in `ACCEPTED_FORMATS` are ever decoded.

use std::fmt;

use crate::errors::{Result, VaultError};

/// Magic marker every vault file starts with.
pub const MAGIC: &str = "$ANSIBLE_VAULT";

/// Field separator inside the header line.
const SEPARATOR: char = ';';

/// Format version written by `encrypt`.
pub const VERSION: &str = "1.1";

/// Cipher identifier written by `encrypt`.
pub const CIPHER: &str = "AES256";

/// Versions known to exist in the wild.
const RECOGNIZED_VERSIONS: &[&str] = &["1.0", "1.1", "1.2"];

/// Every `(version, cipher)` pair this implementation can decode.
const ACCEPTED_FORMATS: &[(&str, &str)] = &[(VERSION, CIPHER)];

/// Returns `true` if `line` starts with the vault marker and a separator.
///
/// No version or cipher check is made, so this recognizes vaults that
/// [`Header::parse`] rejects.
pub fn has_magic(line: &str) -> bool {
    line.trim_start()
        .strip_prefix(MAGIC)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Parsed vault header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    version: String,
    cipher: String,
    label: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: VERSION.to_string(),
            cipher: CIPHER.to_string(),
            label: None,
        }
    }
}

impl Header {
    /// The default header carrying a vault label.
    ///
    /// Labels end up inside a `;`-separated line, so they may not contain
    /// the separator or line breaks.
    pub fn with_label(label: &str) -> Result<Self> {
        if label.contains(SEPARATOR) || label.contains(['\n', '\r']) {
            return Err(VaultError::InvalidFormat(format!(
                "label '{}' may not contain ';' or line breaks",
                label.escape_debug()
            )));
        }

        Ok(Self {
            label: (!label.is_empty()).then(|| label.to_string()),
            ..Self::default()
        })
    }

    /// Parse and validate a header line.
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.trim().splitn(4, SEPARATOR).collect();

        if parts.len() < 3 {
            return Err(VaultError::InvalidFormat(
                "header must have the form $ANSIBLE_VAULT;VERSION;CIPHER".into(),
            ));
        }

        if parts[0] != MAGIC {
            return Err(VaultError::InvalidFormat(format!(
                "missing {MAGIC} marker"
            )));
        }

        let header = Self {
            version: parts[1].to_string(),
            cipher: parts[2].to_string(),
            label: parts
                .get(3)
                .filter(|label| !label.is_empty())
                .map(|label| label.to_string()),
        };
        header.validate()?;

        Ok(header)
    }

    /// Check the version and cipher against the accepted-format table.
    pub fn validate(&self) -> Result<()> {
        if !RECOGNIZED_VERSIONS.contains(&self.version.as_str()) {
            return Err(VaultError::InvalidFormat(format!(
                "unknown vault version '{}'",
                self.version
            )));
        }

        let accepted = ACCEPTED_FORMATS
            .iter()
            .any(|&(version, cipher)| version == self.version && cipher == self.cipher);
        if accepted {
            return Ok(());
        }

        if ACCEPTED_FORMATS.iter().any(|&(version, _)| version == self.version) {
            Err(VaultError::InvalidFormat(format!(
                "unsupported cipher '{}'",
                self.cipher
            )))
        } else {
            Err(VaultError::InvalidFormat(format!(
                "unsupported vault version '{}'",
                self.version
            )))
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn cipher(&self) -> &str {
        &self.cipher
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MAGIC};{};{}", self.version, self.cipher)?;
        if let Some(label) = &self.label {
            write!(f, ";{label}")?;
        }
        Ok(())
    }
}
