//! Cryptographic primitives for the vault format.
//!
//! This module provides:
//! - Hex encoding tolerant of wrapped input (`hex`)
//! - PBKDF2-HMAC-SHA256 key derivation and salt generation (`kdf`)
//! - The derived cipher key / HMAC key / IV triple (`keys`)
//! - AES-256-CTR encryption with PKCS#7 padding (`encryption`)
//! - HMAC-SHA256 authentication of the ciphertext (`integrity`)

pub mod encryption;
pub mod hex;
pub mod integrity;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive, encrypt, decrypt, ...};
pub use encryption::{decrypt, encrypt};
pub use integrity::{authenticate, verify};
pub use kdf::{derive, generate_salt};
pub use keys::KeyMaterial;
