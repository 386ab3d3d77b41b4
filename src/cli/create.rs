use crate::archive::ArchiveWriter;
use crate::error::{Result, SeafError};
use crate::header::{CompressionMethod, FileEntry};
use crate::pipeline::{compress, decode_salt, derive_key, encrypt, validate_level, DEFAULT_LEVEL};
use crate::stats::{entropy, ArchiveReport, EntryStats};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file queued for archiving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub size: u64,
}

/// Options for archive creation
#[derive(Clone)]
pub struct CreateOptions {
    pub password: String,
    /// Salt as a hex string
    pub salt_hex: String,
    /// Compression level, 0-9
    pub level: i32,
    pub method: CompressionMethod,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            password: String::new(),
            salt_hex: String::new(),
            level: DEFAULT_LEVEL,
            method: CompressionMethod::default(),
        }
    }
}

impl std::fmt::Debug for CreateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateOptions")
            .field("password", &"[REDACTED]")
            .field("salt_hex", &self.salt_hex)
            .field("level", &self.level)
            .field("method", &self.method)
            .finish()
    }
}

/// Stat each path in order. Directories are rejected before anything is read.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FileDescriptor>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        if meta.is_dir() {
            return Err(SeafError::Validation(format!(
                "directories are not supported: {}",
                path.display()
            )));
        }
        files.push(FileDescriptor {
            path: path.to_path_buf(),
            size: meta.len(),
        });
    }
    Ok(files)
}

/// Name stored in the archive: the final path component
fn entry_name(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        SeafError::Validation(format!("path has no file name: {}", path.display()))
    })?;
    name.to_str().map(str::to_owned).ok_or_else(|| {
        SeafError::Validation(format!("file name is not valid UTF-8: {}", path.display()))
    })
}

/// Create an archive at `output_path` holding `files` in the given order.
///
/// The output is truncated first and left as-is if a later file fails.
pub fn create_archive(
    output_path: &Path,
    files: &[FileDescriptor],
    options: &CreateOptions,
) -> Result<ArchiveReport> {
    validate_level(options.level)?;
    let file_count = u32::try_from(files.len())
        .map_err(|_| SeafError::Validation(format!("too many files: {}", files.len())))?;
    let names = files
        .iter()
        .map(|file| entry_name(&file.path))
        .collect::<Result<Vec<_>>>()?;

    let salt = decode_salt(&options.salt_hex)?;
    let key = derive_key(&options.password, &salt)?;

    info!(
        output = %output_path.display(),
        files = files.len(),
        method = options.method.name(),
        level = options.level,
        "creating archive"
    );

    let mut writer = ArchiveWriter::create(output_path, file_count)?;
    let mut report = ArchiveReport::default();

    for (file, name) in files.iter().zip(names) {
        let data = std::fs::read(&file.path)?;
        let compressed = compress(&data, options.level, options.method)?;
        let payload = encrypt(&compressed, key.as_bytes())?;

        let stats = EntryStats {
            name: name.clone(),
            original_size: data.len() as u64,
            compressed_size: compressed.len() as u64,
            stored_size: payload.len() as u64,
            entropy: entropy(&data),
        };

        writer.append(&FileEntry::new(name, options.method, payload))?;

        debug!(
            name = %stats.name,
            original = stats.original_size,
            compressed = stats.compressed_size,
            stored = stats.stored_size,
            "entry written"
        );
        report.entries.push(stats);
    }

    writer.finish()?;
    info!(output = %output_path.display(), entries = report.entries.len(), "archive created");
    Ok(report)
}
