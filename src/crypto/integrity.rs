//! HMAC-SHA256 authentication of the ciphertext.
//!
//! The tag covers the ciphertext, not the plaintext. Because the HMAC key
//! comes from the same password as the cipher key, a mismatch is reported
//! as a wrong password.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::{Result, VaultError};

/// Size of an HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// Compute the HMAC-SHA256 tag of `data`.
pub fn authenticate(hmac_key: &[u8], data: &[u8]) -> Result<[u8; TAG_LEN]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(data);

    Ok(mac.finalize().into_bytes().into())
}

/// Recompute the tag of `data` and compare it with `tag` in constant time.
pub fn verify(hmac_key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
    let expected = authenticate(hmac_key, data)?;

    // ct_eq on slices of different lengths is simply false.
    if expected.as_slice().ct_eq(tag).into() {
        Ok(())
    } else {
        Err(VaultError::InvalidPassword)
    }
}
