//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The vault format fixes the parameters: 10 000 iterations and an
//! 80-byte output block, which `KeyMaterial` splits into cipher key,
//! HMAC key and IV.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::{KeyMaterial, DERIVED_LEN};
use crate::errors::{Result, VaultError};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// PBKDF2 iteration count used by the vault format.
pub const ITERATIONS: u32 = 10_000;

/// Derive the key material for one operation from `password` and `salt`.
///
/// The same password + salt always produce the same keys, which is how
/// decryption recovers them without anything being stored.
pub fn derive(password: &[u8], salt: &[u8]) -> KeyMaterial {
    let mut block = [0u8; DERIVED_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, ITERATIONS, &mut block);

    let key = KeyMaterial::from_derived(&block);
    block.zeroize();
    key
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| VaultError::RandomSource(e.to_string()))?;
    Ok(salt)
}
