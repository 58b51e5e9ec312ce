//! AES-256-CTR with PKCS#7-style padding.
//!
//! CTR mode does not need block alignment, but the vault format pads the
//! plaintext anyway, so the padding is kept byte-for-byte:
//!
//! ```text
//! ciphertext = AES-256-CTR(cipher_key, iv, plaintext || pad * pad)
//! ```
//!
//! `pad` is always in `1..=16`; an aligned plaintext gets a full block.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use super::keys::KeyMaterial;
use crate::errors::{Result, VaultError};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

type Aes256Ctr = Ctr128BE<Aes256>;

/// Pad `plaintext` and encrypt it with the cipher key and IV.
///
/// The output is always `plaintext.len() + pad` bytes long.
pub fn encrypt(key: &KeyMaterial, plaintext: &[u8]) -> Result<Vec<u8>> {
    let pad = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;

    let mut buf = Vec::with_capacity(plaintext.len() + pad);
    buf.extend_from_slice(plaintext);
    buf.resize(plaintext.len() + pad, pad as u8);

    apply_keystream(key, &mut buf)
        .map_err(|e| VaultError::EncryptionFailed(format!("cipher setup: {e}")))?;

    Ok(buf)
}

/// Decrypt `ciphertext` and strip the trailing padding.
///
/// Rejects an empty buffer and a pad byte that is zero or longer than the
/// decrypted data.
pub fn decrypt(key: &KeyMaterial, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let mut buf = ciphertext.to_vec();

    apply_keystream(key, &mut buf)
        .map_err(|e| VaultError::EncryptionFailed(format!("cipher setup: {e}")))?;

    let pad = match buf.last() {
        Some(&byte) => usize::from(byte),
        None => return Err(VaultError::CorruptPadding),
    };
    if pad == 0 || pad > buf.len() {
        return Err(VaultError::CorruptPadding);
    }

    buf.truncate(buf.len() - pad);
    Ok(buf)
}

/// CTR is symmetric: the same transform encrypts and decrypts.
fn apply_keystream(
    key: &KeyMaterial,
    buf: &mut [u8],
) -> std::result::Result<(), ctr::cipher::InvalidLength> {
    let mut cipher = Aes256Ctr::new_from_slices(key.cipher_key(), key.iv())?;
    cipher.apply_keystream(buf);
    Ok(())
}
