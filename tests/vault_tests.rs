//! Integration tests for the avault envelope API.

use std::fs;

use avault::errors::VaultError;
use avault::vault::{self, Header, SecretRecord};
use tempfile::TempDir;

/// Envelope produced by the reference tool for `"test\n"` / `"password"`.
const SAMPLE: &str = "$ANSIBLE_VAULT;1.1;AES256
66636665376466363035323339653038313631366530366139353930363639396263336538656638
3232656465323265663737633039363037323039393039620a303065353563633261633964623139
32363666633230313364356230623830383134383432633932333630626462316434333137373131
6362373633313532650a313362613134656433663238333163323865666237366161366164383266
3936";

/// Envelope produced by the reference tool for `""` / `"password"`.
const EMPTY: &str = "$ANSIBLE_VAULT;1.1;AES256
62613733343936633739383863623438363535336535643539623734313533663838643661313230
6231343261616531393039313562663037303566356437370a643965616335653166653032656566
37646235336630613233633233396136636434303338373563366237383939616361313638376434
6464623462326236650a663235666338633036633336303632343834633164323537333030363061
3163";

/// Split an envelope, let `f` modify its record, and reassemble it.
fn tamper(envelope: &str, f: impl FnOnce(&mut SecretRecord)) -> String {
    let (header, body) = envelope.split_once('\n').unwrap();
    let mut record = SecretRecord::decode(body).unwrap();
    f(&mut record);
    format!("{header}\n{}", record.encode())
}

// ---------------------------------------------------------------------------
// Known vectors
// ---------------------------------------------------------------------------

#[test]
fn decrypts_reference_vector() {
    assert_eq!(vault::decrypt(SAMPLE, "password").unwrap(), "test\n");
}

#[test]
fn decrypts_reference_empty_vector() {
    assert_eq!(vault::decrypt(EMPTY, "password").unwrap(), "");
}

#[test]
fn decrypts_reference_vector_with_crlf() {
    let crlf = SAMPLE.replace('\n', "\r\n");
    assert_eq!(vault::decrypt(&crlf, "password").unwrap(), "test\n");
}

#[test]
fn decrypts_reference_vector_with_trailing_newline() {
    let text = format!("{SAMPLE}\n");
    assert_eq!(vault::decrypt(&text, "password").unwrap(), "test\n");
}

// ---------------------------------------------------------------------------
// Encrypt
// ---------------------------------------------------------------------------

#[test]
fn encrypt_starts_with_default_header() {
    let envelope = vault::encrypt("test", "password").unwrap();
    assert!(envelope.starts_with("$ANSIBLE_VAULT;1.1;AES256\n"));
}

#[test]
fn encrypt_body_is_wrapped_hex() {
    let envelope = vault::encrypt("some longer plaintext value", "password").unwrap();
    let body: Vec<&str> = envelope.lines().skip(1).collect();

    assert!(body.len() > 1);
    for line in &body[..body.len() - 1] {
        assert_eq!(line.len(), 80);
    }
    assert!(body
        .iter()
        .all(|l| l.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))));
    assert!(!envelope.ends_with('\n'));
}

#[test]
fn encrypt_record_has_32_byte_salt_and_tag() {
    let envelope = vault::encrypt("test", "password").unwrap();
    let (_, body) = envelope.split_once('\n').unwrap();
    let record = SecretRecord::decode(body).unwrap();

    assert_eq!(record.salt.len(), 32);
    assert_eq!(record.hmac.len(), 32);
    assert_eq!(record.data.len(), 16);
}

#[test]
fn encrypt_uses_fresh_salt_each_time() {
    let a = vault::encrypt("same", "password").unwrap();
    let b = vault::encrypt("same", "password").unwrap();
    assert_ne!(a, b);
}

#[test]
fn encrypt_empty_plaintext() {
    let envelope = vault::encrypt("", "password").unwrap();
    assert_eq!(vault::decrypt(&envelope, "password").unwrap(), "");
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_various_plaintexts() {
    let long = "x".repeat(1000);
    let aligned = "0123456789abcdef";
    for plaintext in ["test\n", "ünïcødé ✓", aligned, long.as_str(), "a:\n  b: c\n"] {
        let envelope = vault::encrypt(plaintext, "pw").unwrap();
        assert_eq!(vault::decrypt(&envelope, "pw").unwrap(), plaintext);
    }
}

#[test]
fn roundtrip_binary_bytes() {
    let plaintext: Vec<u8> = (0u8..=255).collect();
    let envelope = vault::encrypt_bytes(&plaintext, "pw").unwrap();
    assert_eq!(vault::decrypt_bytes(&envelope, "pw").unwrap(), plaintext);
}

#[test]
fn decrypt_rejects_non_utf8_plaintext_as_text() {
    let envelope = vault::encrypt_bytes(&[0xFF, 0xFE, 0x00], "pw").unwrap();
    assert!(matches!(
        vault::decrypt(&envelope, "pw"),
        Err(VaultError::InvalidFormat(_))
    ));
}

#[test]
fn label_roundtrip() {
    let envelope = vault::encrypt_with_label("secret", "pw", "prod").unwrap();
    assert!(envelope.starts_with("$ANSIBLE_VAULT;1.1;AES256;prod\n"));
    assert_eq!(vault::decrypt(&envelope, "pw").unwrap(), "secret");
}

#[test]
fn label_with_separator_is_rejected() {
    assert!(matches!(
        vault::encrypt_with_label("secret", "pw", "a;b"),
        Err(VaultError::InvalidFormat(_))
    ));
}

// ---------------------------------------------------------------------------
// Authentication failures
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_is_invalid_password() {
    let result = vault::decrypt(SAMPLE, "invalid pass");
    assert!(matches!(result, Err(VaultError::InvalidPassword)));
}

#[test]
fn wrong_password_after_encrypt_is_invalid_password() {
    let envelope = vault::encrypt("s3cret", "correct").unwrap();
    let result = vault::decrypt(&envelope, "incorrect");
    assert!(matches!(result, Err(VaultError::InvalidPassword)));
}

#[test]
fn flipped_ciphertext_bits_are_detected() {
    let envelope = vault::encrypt("some secret text", "pw").unwrap();

    for byte in [0usize, 7, 31] {
        for bit in [0u8, 3, 7] {
            let tampered = tamper(&envelope, |r| r.data[byte] ^= 1u8 << bit);
            assert!(
                matches!(
                    vault::decrypt(&tampered, "pw"),
                    Err(VaultError::InvalidPassword)
                ),
                "flip of byte {byte} bit {bit} went undetected"
            );
        }
    }
}

#[test]
fn flipped_mac_bits_are_detected() {
    let envelope = vault::encrypt("some secret text", "pw").unwrap();

    for byte in [0usize, 16, 31] {
        let tampered = tamper(&envelope, |r| r.hmac[byte] ^= 0x80);
        assert!(matches!(
            vault::decrypt(&tampered, "pw"),
            Err(VaultError::InvalidPassword)
        ));
    }
}

#[test]
fn truncated_ciphertext_is_detected() {
    let envelope = vault::encrypt("some secret text", "pw").unwrap();
    let tampered = tamper(&envelope, |r| {
        r.data.pop();
    });
    assert!(matches!(
        vault::decrypt(&tampered, "pw"),
        Err(VaultError::InvalidPassword)
    ));
}

#[test]
fn swapped_salt_is_detected() {
    let envelope = vault::encrypt("some secret text", "pw").unwrap();
    let tampered = tamper(&envelope, |r| r.salt[0] ^= 0x01);
    assert!(matches!(
        vault::decrypt(&tampered, "pw"),
        Err(VaultError::InvalidPassword)
    ));
}

// ---------------------------------------------------------------------------
// Empty password policy
// ---------------------------------------------------------------------------

#[test]
fn encrypt_rejects_empty_password() {
    assert!(matches!(
        vault::encrypt("anything", ""),
        Err(VaultError::EmptyPassword)
    ));
}

#[test]
fn decrypt_rejects_empty_password() {
    assert!(matches!(
        vault::decrypt(EMPTY, ""),
        Err(VaultError::EmptyPassword)
    ));
}

#[test]
fn empty_password_is_checked_before_parsing() {
    // Garbage input still reports the password problem first.
    assert!(matches!(
        vault::decrypt("invalid data", ""),
        Err(VaultError::EmptyPassword)
    ));
}

// ---------------------------------------------------------------------------
// Malformed envelopes
// ---------------------------------------------------------------------------

#[test]
fn single_line_input_is_invalid_format() {
    assert!(matches!(
        vault::decrypt("invalid data", "password"),
        Err(VaultError::InvalidFormat(_))
    ));
}

#[test]
fn unsupported_version_is_invalid_format() {
    let text = SAMPLE.replacen("1.1", "1.0", 1);
    assert!(matches!(
        vault::decrypt(&text, "password"),
        Err(VaultError::InvalidFormat(_))
    ));

    let text = "$ANSIBLE_VAULT;2.0;AES256\n636235663265383266346139";
    assert!(matches!(
        vault::decrypt(text, "password"),
        Err(VaultError::InvalidFormat(_))
    ));
}

#[test]
fn unsupported_cipher_is_invalid_format() {
    let text = SAMPLE.replacen("AES256", "AES", 1);
    assert!(matches!(
        vault::decrypt(&text, "password"),
        Err(VaultError::InvalidFormat(_))
    ));
}

#[test]
fn body_with_one_field_is_invalid_secret() {
    let text = "$ANSIBLE_VAULT;1.1;AES256\n636235663265383266346139";
    assert!(matches!(
        vault::decrypt(text, "password"),
        Err(VaultError::InvalidSecret)
    ));
}

#[test]
fn body_with_two_fields_is_invalid_secret() {
    // hex("aa\nbb")
    let text = "$ANSIBLE_VAULT;1.1;AES256\n61610a6262";
    assert!(matches!(
        vault::decrypt(text, "password"),
        Err(VaultError::InvalidSecret)
    ));
}

#[test]
fn non_hex_body_is_invalid_format() {
    let text = "$ANSIBLE_VAULT;1.1;AES256\nthis is not hex";
    assert!(matches!(
        vault::decrypt(text, "password"),
        Err(VaultError::InvalidFormat(_))
    ));
}

// ---------------------------------------------------------------------------
// Helpers: is_encrypted, rekey
// ---------------------------------------------------------------------------

#[test]
fn is_encrypted_on_reference_vector() {
    assert!(vault::is_encrypted(SAMPLE));
    assert!(!vault::is_encrypted("test\n"));
}

#[test]
fn rekey_changes_password_and_keeps_label() {
    let envelope = vault::encrypt_with_label("payload", "old", "dev").unwrap();
    let rekeyed = vault::rekey(&envelope, "old", "new").unwrap();

    assert!(rekeyed.starts_with("$ANSIBLE_VAULT;1.1;AES256;dev\n"));
    assert_eq!(vault::decrypt(&rekeyed, "new").unwrap(), "payload");
    assert!(matches!(
        vault::decrypt(&rekeyed, "old"),
        Err(VaultError::InvalidPassword)
    ));
}

#[test]
fn rekey_with_wrong_old_password_fails() {
    let result = vault::rekey(SAMPLE, "nope", "new");
    assert!(matches!(result, Err(VaultError::InvalidPassword)));
}

#[test]
fn header_of_encrypted_output_parses() {
    let envelope = vault::encrypt("x", "pw").unwrap();
    let first = envelope.lines().next().unwrap();
    assert_eq!(Header::parse(first).unwrap(), Header::default());
}

// ---------------------------------------------------------------------------
// File variants
// ---------------------------------------------------------------------------

#[test]
fn encrypt_file_then_decrypt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secrets.yml");

    vault::encrypt_file(&path, "input", "password").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("$ANSIBLE_VAULT;1.1;AES256"));
    assert_eq!(vault::decrypt_file(&path, "password").unwrap(), "input");
}

#[test]
fn decrypt_file_reads_reference_vector() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("decrypt");
    fs::write(&path, SAMPLE).unwrap();

    assert_eq!(vault::decrypt_file(&path, "password").unwrap(), "test\n");
}

#[test]
fn decrypt_file_missing_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = vault::decrypt_file(&dir.path().join("missing"), "password");
    assert!(matches!(result, Err(VaultError::Io(_))));
}

#[test]
fn encrypt_file_into_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/out");
    let result = vault::encrypt_file(&path, "input", "password");
    assert!(matches!(result, Err(VaultError::Io(_))));
}

#[test]
fn encrypt_file_rejects_empty_password() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out");
    let result = vault::encrypt_file(&path, "input", "");

    assert!(matches!(result, Err(VaultError::EmptyPassword)));
    assert!(!path.exists());
}
