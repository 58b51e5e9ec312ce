//! Vault module — the Ansible Vault envelope.
//!
//! This module provides:
//! - The `$ANSIBLE_VAULT` header line (`header`)
//! - The double-hex-encoded salt / HMAC / ciphertext record (`secret`)
//! - `encrypt` / `decrypt` and their file variants (`store`)

pub mod header;
pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use header::Header;
pub use secret::SecretRecord;
pub use store::{
    decrypt, decrypt_bytes, decrypt_file, encrypt, encrypt_bytes, encrypt_file,
    encrypt_with_header, encrypt_with_label, is_encrypted, is_vault_text, rekey,
};
