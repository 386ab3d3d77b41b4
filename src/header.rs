use crate::error::{Result, SeafError};
use std::io::{Read, Write};

/// Magic bytes at the start of every archive ("SEAF")
pub const MAGIC: u32 = 0x5345_4146;

/// Current on-disk layout. Version 1 existed in two incompatible shapes, both
/// of which are rejected.
pub const FORMAT_VERSION: u16 = 2;

/// Largest name that fits the u16 length prefix
pub const MAX_NAME_LEN: usize = u16::MAX as usize;

/// Largest payload that fits the u32 length prefix
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// Compression method stored alongside each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    #[default]
    Deflate,
    Zstd,
}

impl CompressionMethod {
    /// Identifier written into the entry's method byte
    pub const fn id(self) -> u8 {
        match self {
            Self::Deflate => 6,
            Self::Zstd => 7,
        }
    }

    /// Map a stored method byte back to a method
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            6 => Ok(Self::Deflate),
            7 => Ok(Self::Zstd),
            other => Err(SeafError::UnsupportedMethod(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Deflate => "deflate",
            Self::Zstd => "zstd",
        }
    }
}

impl std::str::FromStr for CompressionMethod {
    type Err = SeafError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deflate" => Ok(Self::Deflate),
            "zstd" => Ok(Self::Zstd),
            _ => Err(SeafError::Validation(format!(
                "unknown compression method: {}",
                s
            ))),
        }
    }
}

/// Fixed-size archive header
/// Layout: [magic: 4][version: 2][file_count: 4], big-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub version: u16,
    pub file_count: u32,
}

impl ArchiveHeader {
    /// Header size: 4 (magic) + 2 (version) + 4 (file count) = 10 bytes
    pub const SIZE: usize = 10;

    pub fn new(file_count: u32) -> Self {
        Self {
            version: FORMAT_VERSION,
            file_count,
        }
    }

    /// Serialize header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&MAGIC.to_be_bytes());
        buf[4..6].copy_from_slice(&self.version.to_be_bytes());
        buf[6..10].copy_from_slice(&self.file_count.to_be_bytes());
        buf
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read and validate a header. Magic is checked before the version so a
    /// foreign file is always reported as corrupt.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let magic = read_u32(reader)?;
        if magic != MAGIC {
            return Err(SeafError::CorruptArchive(format!(
                "bad magic 0x{:08x}",
                magic
            )));
        }

        let version = read_u16(reader)?;
        if version != FORMAT_VERSION {
            return Err(SeafError::UnsupportedVersion(version));
        }

        let file_count = read_u32(reader)?;
        Ok(Self {
            version,
            file_count,
        })
    }
}

/// One archived file
/// Layout: [name_len: 2][name][method: 1][payload_len: 4][payload], big-endian
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// Raw method byte; resolved with `CompressionMethod::from_id` after decryption
    pub method: u8,
    /// nonce || ciphertext || tag
    pub payload: Vec<u8>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, method: CompressionMethod, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            method: method.id(),
            payload,
        }
    }

    /// Bytes this entry occupies on disk
    pub fn encoded_len(&self) -> usize {
        2 + self.name.len() + 1 + 4 + self.payload.len()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let name = self.name.as_bytes();
        if name.len() > MAX_NAME_LEN {
            return Err(SeafError::Validation(format!(
                "file name is {} bytes, limit is {}",
                name.len(),
                MAX_NAME_LEN
            )));
        }
        if self.payload.len() > MAX_PAYLOAD_LEN {
            return Err(SeafError::Validation(format!(
                "entry payload is {} bytes, limit is {}",
                self.payload.len(),
                MAX_PAYLOAD_LEN
            )));
        }

        writer.write_all(&(name.len() as u16).to_be_bytes())?;
        writer.write_all(name)?;
        writer.write_all(&[self.method])?;
        writer.write_all(&(self.payload.len() as u32).to_be_bytes())?;
        writer.write_all(&self.payload)?;
        Ok(())
    }

    /// Read one entry. Declared lengths are consumed exactly; a short read
    /// surfaces as an `UnexpectedEof` I/O error.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let name_len = read_u16(reader)? as usize;
        let mut name_bytes = vec![0u8; name_len];
        reader.read_exact(&mut name_bytes)?;
        let name = String::from_utf8(name_bytes)
            .map_err(|_| SeafError::CorruptArchive("entry name is not valid UTF-8".into()))?;

        let mut method = [0u8; 1];
        reader.read_exact(&mut method)?;

        // Grow with the bytes actually present, never with the declared length
        let payload_len = u64::from(read_u32(reader)?);
        let mut payload = Vec::new();
        Read::take(&mut *reader, payload_len).read_to_end(&mut payload)?;
        if payload.len() as u64 != payload_len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "entry payload truncated",
            )
            .into());
        }

        Ok(Self {
            name,
            method: method[0],
            payload,
        })
    }
}

fn read_u16<R: Read>(reader: &mut R) -> std::io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}
