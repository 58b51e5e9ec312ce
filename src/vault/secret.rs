//! The secret record carried in the envelope body.
//!
//! The body is hex-encoded twice:
//!
//! ```text
//! body  = wrap80(hex(inner))
//! inner = hex(salt) "\n" hex(hmac) "\n" hex(ciphertext)
//! ```

use crate::crypto::hex;
use crate::errors::{Result, VaultError};

/// Column at which the encoded body is wrapped.
pub const LINE_WIDTH: usize = 80;

/// Salt, HMAC tag and ciphertext of one vault payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// PBKDF2 salt the keys were derived with.
    pub salt: Vec<u8>,
    /// HMAC-SHA256 over `data`.
    pub hmac: Vec<u8>,
    /// AES-256-CTR ciphertext (padding included).
    pub data: Vec<u8>,
}

impl SecretRecord {
    /// Encode the record into the wrapped body text (no header, no
    /// trailing newline).
    pub fn encode(&self) -> String {
        let inner = [
            hex::encode(&self.salt),
            hex::encode(&self.hmac),
            hex::encode(&self.data),
        ]
        .join("\n");

        wrap(&hex::encode(inner.as_bytes()), LINE_WIDTH)
    }

    /// Decode the body text that follows the header line.
    pub fn decode(body: &str) -> Result<Self> {
        let inner = hex::decode(body)?;
        let inner = std::str::from_utf8(&inner)
            .map_err(|_| VaultError::InvalidFormat("vault payload is not text".into()))?;

        let fields: Vec<&str> = inner.split('\n').collect();
        let [salt, hmac, data] = fields.as_slice() else {
            return Err(VaultError::InvalidSecret);
        };

        Ok(Self {
            salt: hex::decode(salt)?,
            hmac: hex::decode(hmac)?,
            data: hex::decode(data)?,
        })
    }
}

/// Insert a newline after every `width` characters of ASCII `text`.
fn wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / width);

    for (i, chunk) in text.as_bytes().chunks(width).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Hex output is ASCII, so every chunk boundary is a char boundary.
        out.push_str(&String::from_utf8_lossy(chunk));
    }

    out
}
