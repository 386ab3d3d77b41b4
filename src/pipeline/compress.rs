use crate::error::{Result, SeafError};
use crate::header::CompressionMethod;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{Read, Write};

/// Lowest accepted compression level (store only for deflate)
pub const MIN_LEVEL: i32 = 0;

/// Highest accepted compression level
pub const MAX_LEVEL: i32 = 9;

/// Level used when the caller does not pick one
pub const DEFAULT_LEVEL: i32 = 6;

/// Reject levels outside [0, 9]
pub fn validate_level(level: i32) -> Result<u32> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(SeafError::Validation(format!(
            "invalid compression level: {}, must be between {} and {}",
            level, MIN_LEVEL, MAX_LEVEL
        )));
    }
    Ok(level as u32)
}

/// Compress data using the specified method
pub fn compress(data: &[u8], level: i32, method: CompressionMethod) -> Result<Vec<u8>> {
    let level = validate_level(level)?;
    match method {
        CompressionMethod::Deflate => compress_deflate(data, level),
        CompressionMethod::Zstd => compress_zstd(data, level),
    }
}

/// Decompress data using the specified method
pub fn decompress(data: &[u8], method: CompressionMethod) -> Result<Vec<u8>> {
    match method {
        CompressionMethod::Deflate => decompress_deflate(data),
        CompressionMethod::Zstd => decompress_zstd(data),
    }
}

/// Decompress data tagged with a raw method byte read from an archive
pub fn decompress_with_id(data: &[u8], method_id: u8) -> Result<Vec<u8>> {
    let method = CompressionMethod::from_id(method_id)?;
    decompress(data, method)
}

fn compress_deflate(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| SeafError::Compression(format!("deflate: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| SeafError::Compression(format!("deflate: {}", e)))
}

fn decompress_deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut output)
        .map_err(|e| SeafError::Decompression(format!("deflate: {}", e)))?;
    Ok(output)
}

fn compress_zstd(data: &[u8], level: u32) -> Result<Vec<u8>> {
    // zstd treats 0 as "library default"; keep 0 the fastest setting instead
    let level = level.max(1) as i32;
    zstd::encode_all(data, level).map_err(|e| SeafError::Compression(format!("zstd: {}", e)))
}

fn decompress_zstd(data: &[u8]) -> Result<Vec<u8>> {
    zstd::decode_all(data).map_err(|e| SeafError::Decompression(format!("zstd: {}", e)))
}
