//! SEAF - Secure Encrypted Archive Format
//!
//! A single-file container bundling flat files, each compressed on its own
//! and then sealed with AES-256-GCM under a key stretched from a password
//! and a hex salt by scrypt.
//!
//! ## Transform Pipeline
//!
//! ```text
//! Create:  Read → Compress → Encrypt → Append entry
//! Extract: Read entry → Decrypt → Decompress → Write file
//! ```
//!
//! - **Key**: scrypt (N = 32768, r = 8, p = 1), derived once per operation
//! - **Compress**: raw deflate (default) or zstd, level 0-9
//! - **Encrypt**: AES-256-GCM, fresh random 12-byte nonce per entry
//!
//! ## File Layout
//!
//! ```text
//! Header:  magic:u32 | version:u16 | fileCount:u32
//! Entry*:  nameLen:u16 | name | method:u8 | payloadLen:u32 | nonce ‖ ciphertext ‖ tag
//! ```
//!
//! All integers are big-endian.
//!
//! ## Example
//!
//! ```no_run
//! use seaf::cli::{collect_files, create_archive, extract_archive, CreateOptions, ExtractOptions};
//! use std::path::Path;
//!
//! let files = collect_files(&["notes.txt", "photo.jpg"]).unwrap();
//! let create_opts = CreateOptions {
//!     password: "correct horse".into(),
//!     salt_hex: "a1b2c3d4e5f60718".into(),
//!     ..Default::default()
//! };
//! create_archive(Path::new("backup.seaf"), &files, &create_opts).unwrap();
//!
//! let extract_opts = ExtractOptions {
//!     password: "correct horse".into(),
//!     salt_hex: "a1b2c3d4e5f60718".into(),
//!     ..Default::default()
//! };
//! extract_archive(Path::new("backup.seaf"), &extract_opts).unwrap();
//! ```

pub mod archive;
pub mod cli;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod stats;

pub use archive::{read_archive_header, ArchiveReader, ArchiveWriter};
pub use error::{Result, SeafError};
pub use header::{ArchiveHeader, CompressionMethod, FileEntry};
