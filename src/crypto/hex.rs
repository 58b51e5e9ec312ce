//! Lowercase hexadecimal encoding used throughout the vault body.
//!
//! Decoding ignores ASCII whitespace so wrapped (and CRLF) vault text can
//! be fed in directly.

use crate::errors::{Result, VaultError};

/// Encode `bytes` as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Decode hex text, skipping spaces, tabs, CR and LF.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    ::hex::decode(compact.as_bytes())
        .map_err(|e| VaultError::InvalidFormat(format!("invalid hex data: {e}")))
}
