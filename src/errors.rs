use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in avault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Envelope errors ---
    #[error("Vault password must not be empty")]
    EmptyPassword,

    #[error("Invalid vault format: {0}")]
    InvalidFormat(String),

    #[error("Invalid secret — vault payload does not contain salt, hmac and ciphertext")]
    InvalidSecret,

    #[error("Invalid password — wrong password or the vault data was tampered with")]
    InvalidPassword,

    #[error("Decrypted data has corrupt padding")]
    CorruptPadding,

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    // --- File errors ---
    #[error("{0} is already encrypted")]
    AlreadyEncrypted(PathBuf),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for avault results.
pub type Result<T> = std::result::Result<T, VaultError>;
