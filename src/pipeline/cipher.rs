//! AES-256-GCM payload encryption
//!
//! Blob format:
//! ```text
//! [12 bytes: random nonce][N bytes: ciphertext][16 bytes: GCM tag]
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, SeafError};
use crate::pipeline::kdf::KEY_SIZE;

/// GCM nonce length
pub const NONCE_SIZE: usize = 12;

/// GCM tag length
pub const TAG_SIZE: usize = 16;

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm> {
    if key.len() != KEY_SIZE {
        return Err(SeafError::InvalidKeyLength {
            expected: KEY_SIZE,
            got: key.len(),
        });
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| SeafError::InvalidKeyLength {
        expected: KEY_SIZE,
        got: key.len(),
    })
}

/// Encrypt with a fresh random nonce.
///
/// Returns `[nonce][ciphertext][tag]`.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| SeafError::Validation("plaintext too large for AES-GCM".into()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Verify and decrypt a `[nonce][ciphertext][tag]` blob.
///
/// Every failure past the key length check is reported as `Authentication`.
pub fn decrypt(blob: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    if blob.len() < NONCE_SIZE {
        return Err(SeafError::Authentication);
    }
    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| SeafError::Authentication)
}
