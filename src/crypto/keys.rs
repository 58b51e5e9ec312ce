//! Key material derived from a vault password.
//!
//! One PBKDF2 output block is split into three independent pieces:
//! - the AES-256 **cipher key**,
//! - the **HMAC key** used to authenticate the ciphertext,
//! - the CTR-mode **initialization vector**.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the cipher key and of the HMAC key (256 bits each).
pub const KEY_LEN: usize = 32;

/// Length of the CTR initialization vector (one AES block).
pub const IV_LEN: usize = 16;

/// Total number of bytes requested from the KDF.
pub const DERIVED_LEN: usize = 2 * KEY_LEN + IV_LEN;

/// Keys for a single encrypt or decrypt operation.
///
/// Never stored; recomputed from `(password, salt)` every time and wiped
/// from memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    cipher_key: [u8; KEY_LEN],
    hmac_key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl KeyMaterial {
    /// Split a derived block as `[0:32)` cipher key, `[32:64)` HMAC key,
    /// `[64:80)` IV.
    pub fn from_derived(block: &[u8; DERIVED_LEN]) -> Self {
        let mut cipher_key = [0u8; KEY_LEN];
        let mut hmac_key = [0u8; KEY_LEN];
        let mut iv = [0u8; IV_LEN];

        cipher_key.copy_from_slice(&block[..KEY_LEN]);
        hmac_key.copy_from_slice(&block[KEY_LEN..2 * KEY_LEN]);
        iv.copy_from_slice(&block[2 * KEY_LEN..]);

        Self {
            cipher_key,
            hmac_key,
            iv,
        }
    }

    /// The AES-256 key.
    pub fn cipher_key(&self) -> &[u8; KEY_LEN] {
        &self.cipher_key
    }

    /// The HMAC-SHA256 key.
    pub fn hmac_key(&self) -> &[u8; KEY_LEN] {
        &self.hmac_key
    }

    /// The initial counter block.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial([REDACTED])")
    }
}
