//! Secret-at-rest encoding for the persisted session token.
//!
//! Tokens are sealed with AES-256-GCM and stored as Base64 of
//! `[nonce (12 bytes)][ciphertext]`.

use crate::error::{Error, Result};
use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Key for sealing tokens in `client.toml`.
///
/// WARNING: this only keeps tokens from sitting in plain text; anyone with
/// the binary can recover them. Use an OS keychain for real secrecy.
const MASTER_KEY: &[u8; 32] = b"LmsClientTokenSealingKey-2026-v1";

const NONCE_LEN: usize = 12;

/// Encrypt a plaintext string, returning Base64 of nonce + ciphertext
pub fn encrypt(plain_text: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(MASTER_KEY.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::invalid(format!("Encryption failed: {e}")))?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Decrypt a value produced by [`encrypt`]
pub fn decrypt(cipher_text: &str) -> Result<String> {
    let data = BASE64
        .decode(cipher_text)
        .map_err(|e| Error::invalid(format!("Base64 decode failed: {e}")))?;

    if data.len() < NONCE_LEN {
        return Err(Error::invalid("Ciphertext too short"));
    }

    let cipher = Aes256Gcm::new(MASTER_KEY.into());
    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);

    let plaintext_bytes = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| Error::invalid(format!("Decryption failed: {e}")))?;

    String::from_utf8(plaintext_bytes)
        .map_err(|e| Error::invalid(format!("UTF-8 decode failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let original = "eyJhbGciOiJIUzI1NiJ9.session";
        let encrypted = encrypt(original).expect("Encryption failed");
        let decrypted = decrypt(&encrypted).expect("Decryption failed");
        assert_eq!(original, decrypted);
    }

    #[test]
    fn test_encrypt_uses_fresh_nonce() {
        let encrypted1 = encrypt("token").expect("Encryption failed");
        let encrypted2 = encrypt("token").expect("Encryption failed");
        assert_ne!(encrypted1, encrypted2);
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        assert!(decrypt("not_valid_base64!!!").is_err());
        assert!(decrypt("AQIDBA==").is_err());
    }
}
