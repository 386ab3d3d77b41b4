use crate::archive::ArchiveReader;
use crate::error::Result;
use crate::header::{CompressionMethod, MAGIC};
use crate::pipeline::{NONCE_SIZE, TAG_SIZE};
use crate::stats::format_size;
use serde::Serialize;
use std::path::Path;

/// Framing-level description of one entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryListing {
    pub name: String,
    pub method_id: u8,
    pub method: String,
    pub payload_len: u64,
}

/// Everything that can be learned about an archive without the password
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveListing {
    pub version: u16,
    pub file_count: u32,
    pub entries: Vec<EntryListing>,
}

impl ArchiveListing {
    pub fn render(&self, path: &Path) -> String {
        let mut output = String::new();

        output.push_str("SEAF Archive Information\n");
        output.push_str("========================\n\n");

        output.push_str(&format!("File: {}\n", path.display()));
        output.push_str(&format!("Magic: 0x{:08x}\n", MAGIC));
        output.push_str(&format!("Version: {}\n", self.version));
        output.push_str(&format!("Files: {}\n", self.file_count));
        output.push('\n');

        output.push_str("Entries:\n");
        for entry in &self.entries {
            output.push_str(&format!(
                "  {}  [{}]  {} stored\n",
                entry.name,
                entry.method,
                format_size(entry.payload_len)
            ));
        }
        output.push('\n');

        let stored: u64 = self.entries.iter().map(|e| e.payload_len).sum();
        output.push_str(&format!("Payload total: {}\n", format_size(stored)));
        output.push_str(&format!(
            "Per-entry crypto overhead: {} bytes (nonce + tag)\n",
            NONCE_SIZE + TAG_SIZE
        ));

        output
    }
}

/// Walk the header and entry framing without decrypting anything
pub fn inspect_archive(path: &Path) -> Result<ArchiveListing> {
    let mut reader = ArchiveReader::open(path)?;
    let header = *reader.header();

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry()? {
        let method = match CompressionMethod::from_id(entry.method) {
            Ok(method) => method.name().to_string(),
            Err(_) => format!("unknown({})", entry.method),
        };
        entries.push(EntryListing {
            name: entry.name,
            method_id: entry.method,
            method,
            payload_len: entry.payload.len() as u64,
        });
    }

    Ok(ArchiveListing {
        version: header.version,
        file_count: header.file_count,
        entries,
    })
}

/// Display information about an archive
pub fn show_info(path: &Path) -> Result<String> {
    Ok(inspect_archive(path)?.render(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveWriter;
    use crate::cli::create::{collect_files, create_archive, CreateOptions};
    use crate::header::FileEntry;
    use tempfile::tempdir;

    #[test]
    fn test_show_info() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let archive = dir.path().join("test.seaf");
        std::fs::write(&input, b"Test data").unwrap();

        let options = CreateOptions {
            password: "secret".into(),
            salt_hex: "00ff".into(),
            method: CompressionMethod::Zstd,
            ..Default::default()
        };
        create_archive(&archive, &collect_files(&[&input]).unwrap(), &options).unwrap();

        let info = show_info(&archive).unwrap();
        assert!(info.contains("Version: 2"));
        assert!(info.contains("Files: 1"));
        assert!(info.contains("input.txt  [zstd]"));
    }

    #[test]
    fn test_inspect_lists_unknown_methods() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("odd.seaf");

        let mut writer = ArchiveWriter::create(&archive, 1).unwrap();
        writer
            .append(&FileEntry {
                name: "odd.bin".into(),
                method: 99,
                payload: vec![0; 40],
            })
            .unwrap();
        writer.finish().unwrap();

        let listing = inspect_archive(&archive).unwrap();
        assert_eq!(listing.file_count, 1);
        assert_eq!(listing.entries[0].method, "unknown(99)");
        assert_eq!(listing.entries[0].payload_len, 40);

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["entries"][0]["name"], "odd.bin");
    }
}
