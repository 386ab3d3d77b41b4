use crate::archive::ArchiveReader;
use crate::error::Result;
use crate::pipeline::{decode_salt, decompress_with_id, decrypt, derive_key};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for the extract command
#[derive(Clone)]
pub struct ExtractOptions {
    pub password: String,
    /// Salt as a hex string
    pub salt_hex: String,
    /// Directory entries are written into; the working directory by default
    pub output_dir: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            password: String::new(),
            salt_hex: String::new(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl std::fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("password", &"[REDACTED]")
            .field("salt_hex", &self.salt_hex)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Extract every entry of an archive into `options.output_dir`
///
/// Entries are decrypted, decompressed and written one at a time under their
/// stored names, silently replacing existing files. The first failure aborts;
/// files written before it stay on disk.
/// Returns the written paths in archive order.
pub fn extract_archive(archive_path: &Path, options: &ExtractOptions) -> Result<Vec<PathBuf>> {
    let salt = decode_salt(&options.salt_hex)?;
    let key = derive_key(&options.password, &salt)?;

    let mut reader = ArchiveReader::open(archive_path)?;
    info!(
        archive = %archive_path.display(),
        entries = reader.header().file_count,
        "extracting archive"
    );

    let mut written = Vec::new();
    while let Some(entry) = reader.next_entry()? {
        let compressed = decrypt(&entry.payload, key.as_bytes())?;
        let data = decompress_with_id(&compressed, entry.method)?;

        let target = options.output_dir.join(&entry.name);
        std::fs::write(&target, &data)?;
        debug!(name = %entry.name, size = data.len(), "entry extracted");
        written.push(target);
    }

    info!(archive = %archive_path.display(), files = written.len(), "extraction complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveWriter;
    use crate::cli::create::{collect_files, create_archive, CreateOptions};
    use crate::error::SeafError;
    use crate::header::{CompressionMethod, FileEntry};
    use crate::pipeline::{compress, encrypt};
    use tempfile::tempdir;

    fn create_options() -> CreateOptions {
        CreateOptions {
            password: "pw".into(),
            salt_hex: "aabbcc".into(),
            ..Default::default()
        }
    }

    fn extract_options(dir: &Path) -> ExtractOptions {
        ExtractOptions {
            password: "pw".into(),
            salt_hex: "aabbcc".into(),
            output_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_extract_roundtrip() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let archive = dir.path().join("test.seaf");

        std::fs::write(&input, b"Hello, World! This is a test.").unwrap();
        let files = collect_files(&[&input]).unwrap();
        create_archive(&archive, &files, &create_options()).unwrap();

        let written = extract_archive(&archive, &extract_options(out.path())).unwrap();
        assert_eq!(written, vec![out.path().join("input.txt")]);
        assert_eq!(
            std::fs::read(&written[0]).unwrap(),
            b"Hello, World! This is a test."
        );
    }

    #[test]
    fn test_extract_overwrites_existing() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        let input = dir.path().join("note.txt");
        let archive = dir.path().join("test.seaf");

        std::fs::write(&input, b"new").unwrap();
        std::fs::write(out.path().join("note.txt"), b"old contents").unwrap();
        create_archive(&archive, &collect_files(&[&input]).unwrap(), &create_options()).unwrap();

        extract_archive(&archive, &extract_options(out.path())).unwrap();
        assert_eq!(std::fs::read(out.path().join("note.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_extract_unknown_method_keeps_earlier_files() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        let archive = dir.path().join("mixed.seaf");
        let key = derive_key("pw", &[0xaa, 0xbb, 0xcc]).unwrap();

        let good = encrypt(
            &compress(b"first", 6, CompressionMethod::Deflate).unwrap(),
            key.as_bytes(),
        )
        .unwrap();
        let unknown = encrypt(b"whatever", key.as_bytes()).unwrap();

        let mut writer = ArchiveWriter::create(&archive, 2).unwrap();
        writer
            .append(&FileEntry::new("first.txt", CompressionMethod::Deflate, good))
            .unwrap();
        writer
            .append(&FileEntry {
                name: "second.txt".into(),
                method: 200,
                payload: unknown,
            })
            .unwrap();
        writer.finish().unwrap();

        let err = extract_archive(&archive, &extract_options(out.path())).unwrap_err();
        assert!(matches!(err, SeafError::UnsupportedMethod(200)));
        // No rollback of entries that already succeeded
        assert_eq!(std::fs::read(out.path().join("first.txt")).unwrap(), b"first");
        assert!(!out.path().join("second.txt").exists());
    }

    #[test]
    fn test_extract_wrong_password() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        let input = dir.path().join("secret.txt");
        let archive = dir.path().join("test.seaf");

        std::fs::write(&input, b"Secret data").unwrap();
        create_archive(&archive, &collect_files(&[&input]).unwrap(), &create_options()).unwrap();

        let options = ExtractOptions {
            password: "wrong".into(),
            ..extract_options(out.path())
        };
        let err = extract_archive(&archive, &options).unwrap_err();
        assert!(matches!(err, SeafError::Authentication));
        assert!(!out.path().join("secret.txt").exists());
    }

    #[test]
    fn test_extract_bad_salt_hex() {
        let dir = tempdir().unwrap();
        let options = ExtractOptions {
            salt_hex: "zz".into(),
            ..extract_options(dir.path())
        };
        // Salt is decoded before the archive is even opened
        let err = extract_archive(&dir.path().join("missing.seaf"), &options).unwrap_err();
        assert!(matches!(err, SeafError::SaltFormat(_)));
    }
}
