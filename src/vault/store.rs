//! High-level vault operations used by CLI commands.
//!
//! These functions wire the crypto layer and the envelope codec together.
//! Decryption walks a fixed sequence of gates and stops at the first
//! failure:
//!
//! ```text
//! header -> body -> record -> keys -> HMAC -> plaintext
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::crypto::{self, kdf};
use crate::errors::{Result, VaultError};

use super::header::{self, Header};
use super::secret::SecretRecord;

/// Encrypt `plaintext` with `password` into a vault envelope.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    encrypt_bytes(plaintext.as_bytes(), password)
}

/// Encrypt `plaintext` and record `label` in the header.
pub fn encrypt_with_label(plaintext: &str, password: &str, label: &str) -> Result<String> {
    encrypt_with_header(&Header::with_label(label)?, plaintext.as_bytes(), password)
}

/// Encrypt arbitrary bytes with `password` into a vault envelope.
pub fn encrypt_bytes(plaintext: &[u8], password: &str) -> Result<String> {
    encrypt_with_header(&Header::default(), plaintext, password)
}

/// Encrypt `plaintext` under `password` and serialize it behind `header`.
pub fn encrypt_with_header(header: &Header, plaintext: &[u8], password: &str) -> Result<String> {
    // Policy check before any crypto work.
    if password.is_empty() {
        return Err(VaultError::EmptyPassword);
    }

    let salt = kdf::generate_salt()?;
    let key = crypto::derive(password.as_bytes(), &salt);

    let data = crypto::encrypt(&key, plaintext)?;
    let hmac = crypto::authenticate(key.hmac_key(), &data)?;

    let record = SecretRecord {
        salt: salt.to_vec(),
        hmac: hmac.to_vec(),
        data,
    };
    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = record.data.len(),
        label = header.label(),
        "encrypted vault payload"
    );

    Ok(format!("{header}\n{}", record.encode()))
}

/// Decrypt a vault envelope and return the plaintext as text.
pub fn decrypt(envelope: &str, password: &str) -> Result<String> {
    let plaintext = decrypt_bytes(envelope, password)?;

    String::from_utf8(plaintext)
        .map_err(|_| VaultError::InvalidFormat("decrypted data is not valid UTF-8".into()))
}

/// Decrypt a vault envelope and return the raw plaintext bytes.
pub fn decrypt_bytes(envelope: &str, password: &str) -> Result<Vec<u8>> {
    open(envelope, password).map(|(_, plaintext)| plaintext)
}

/// Re-encrypt an envelope under `new_password` with a fresh salt.
///
/// The label of the original header is kept.
pub fn rekey(envelope: &str, old_password: &str, new_password: &str) -> Result<String> {
    if new_password.is_empty() {
        return Err(VaultError::EmptyPassword);
    }

    let (header, plaintext) = open(envelope, old_password)?;
    encrypt_with_header(&header, &plaintext, new_password)
}

/// Returns `true` if the first line of `text` is an accepted vault header.
pub fn is_encrypted(text: &str) -> bool {
    text.lines()
        .next()
        .is_some_and(|line| Header::parse(line).is_ok())
}

/// Returns `true` if `text` starts with the vault marker, whatever the
/// version or cipher.
///
/// Unlike [`is_encrypted`] this also matches envelopes this crate cannot
/// decode, such as `1.2` headers written with a vault id.
pub fn is_vault_text(text: &str) -> bool {
    text.lines().next().is_some_and(header::has_magic)
}

/// Encrypt `plaintext` and write the envelope to `path` **atomically**.
pub fn encrypt_file(path: &Path, plaintext: &str, password: &str) -> Result<()> {
    let envelope = encrypt(plaintext, password)?;
    write_atomic(path, envelope.as_bytes())
}

/// Read the envelope stored at `path` and decrypt it.
pub fn decrypt_file(path: &Path, password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(VaultError::EmptyPassword);
    }

    let envelope = fs::read_to_string(path)?;
    debug!(path = %path.display(), "read vault file");
    decrypt(&envelope, password)
}

/// Write `contents` to `path` via a temp file and rename.
///
/// The temp file is in the same directory, so the rename is atomic on
/// the same filesystem and readers never see a half-written file. An
/// existing target keeps its permissions; a new file is created with
/// owner-only access.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Dropping the temp file on any early return removes it from disk.
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Run the decrypt gates and return the parsed header with the plaintext.
fn open(envelope: &str, password: &str) -> Result<(Header, Vec<u8>)> {
    if password.is_empty() {
        return Err(VaultError::EmptyPassword);
    }

    let Some((header_line, body)) = envelope.split_once('\n') else {
        return Err(VaultError::InvalidFormat(
            "expected a header line followed by the vault body".into(),
        ));
    };

    let header = Header::parse(header_line)?;
    debug!(version = header.version(), cipher = header.cipher(), "parsed vault header");

    let record = SecretRecord::decode(body)?;
    debug!(
        salt_len = record.salt.len(),
        ciphertext_len = record.data.len(),
        "decoded secret record"
    );

    let key = crypto::derive(password.as_bytes(), &record.salt);
    crypto::verify(key.hmac_key(), &record.data, &record.hmac)?;

    let plaintext = crypto::decrypt(&key, &record.data)?;
    Ok((header, plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn is_encrypted_detects_header() {
        assert!(is_encrypted("$ANSIBLE_VAULT;1.1;AES256\n6162"));
        assert!(is_encrypted("$ANSIBLE_VAULT;1.1;AES256;dev\n"));
        assert!(!is_encrypted("plain: yaml\n"));
        assert!(!is_encrypted("$ANSIBLE_VAULT;1.2;AES256;dev\n"));
        assert!(!is_encrypted(""));
    }

    #[test]
    fn is_vault_text_matches_any_version() {
        assert!(is_vault_text("$ANSIBLE_VAULT;1.2;AES256;dev\n6162"));
        assert!(is_vault_text("$ANSIBLE_VAULT;1.0;AES\n"));
        assert!(is_vault_text("  $ANSIBLE_VAULT;1.1;AES256"));
        assert!(!is_vault_text("$ANSIBLE_VAULTED: true\n"));
        assert!(!is_vault_text("key: $ANSIBLE_VAULT;1.1;AES256\n"));
        assert!(!is_vault_text(""));
    }

    #[test]
    fn rekey_rejects_empty_new_password() {
        let envelope = encrypt("x", "old").unwrap();
        assert!(matches!(
            rekey(&envelope, "old", ""),
            Err(VaultError::EmptyPassword)
        ));
    }

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.yml");

        write_atomic(&path, b"content").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"content");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.yml");
        fs::write(&path, "old content that is longer").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn write_atomic_into_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("secrets.yml");

        assert!(matches!(write_atomic(&path, b"x"), Err(VaultError::Io(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.yml");
        fs::write(&path, "vault").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, b"plain").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_creates_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.yml");

        write_atomic(&path, b"plain").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn decrypt_file_checks_password_before_reading() {
        let result = decrypt_file(Path::new("/nonexistent/vault.yml"), "");
        assert!(matches!(result, Err(VaultError::EmptyPassword)));
    }
}
