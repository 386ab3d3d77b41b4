//! Password → key stretching with scrypt

use crate::error::{Result, SeafError};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

/// Derived key length in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Salt length used when the caller asks for a fresh salt
pub const DEFAULT_SALT_LEN: usize = 16;

/// A 256-bit key derived from a password.
///
/// Zeroized on drop; never printed.
#[derive(Clone)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("bytes", &"[REDACTED]").finish()
    }
}

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// log2 of the CPU/memory cost N
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
}

impl Default for KdfParams {
    /// N = 32768, r = 8, p = 1 (32 MiB, tens of milliseconds per attempt)
    fn default() -> Self {
        Self {
            log_n: 15,
            r: 8,
            p: 1,
        }
    }
}

/// Decode a hex salt. Fails before any key stretching happens.
pub fn decode_salt(salt_hex: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(salt_hex)?)
}

/// Generate `len` random bytes from the OS CSPRNG, hex-encoded
pub fn generate_salt(len: usize) -> Result<String> {
    if len == 0 {
        return Err(SeafError::Validation(format!("invalid salt length: {}", len)));
    }
    let mut salt = vec![0u8; len];
    OsRng.fill_bytes(&mut salt);
    Ok(hex::encode(salt))
}

/// Derive the archive key with the fixed format parameters
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Key> {
    derive_key_with(password, salt, &KdfParams::default())
}

/// Derive a key with explicit scrypt parameters
pub fn derive_key_with(password: &str, salt: &[u8], params: &KdfParams) -> Result<Key> {
    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, KEY_SIZE)
        .map_err(|e| SeafError::KeyDerivation(format!("invalid scrypt params: {}", e)))?;

    let mut bytes = [0u8; KEY_SIZE];
    scrypt::scrypt(password.as_bytes(), salt, &scrypt_params, &mut bytes)
        .map_err(|e| SeafError::KeyDerivation(format!("scrypt: {}", e)))?;

    Ok(Key::from_bytes(bytes))
}
