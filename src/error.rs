use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeafError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid salt: {0}")]
    SaltFormat(#[from] hex::FromHexError),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Wrong password, wrong salt and tampered payloads all end up here.
    #[error("Authentication failed: wrong password or salt, or the archive was modified")]
    Authentication,

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Unsupported archive version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unsupported compression method: {0}")]
    UnsupportedMethod(u8),
}

pub type Result<T> = std::result::Result<T, SeafError>;
