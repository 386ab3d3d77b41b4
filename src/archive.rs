use crate::error::{Result, SeafError};
use crate::header::{ArchiveHeader, FileEntry};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Sequential archive writer
/// The header is written on construction; entries follow in append order.
pub struct ArchiveWriter<W: Write> {
    writer: W,
    declared: u32,
    written: u32,
}

impl<W: Write> ArchiveWriter<W> {
    /// Write the header for `file_count` entries
    pub fn new(mut writer: W, file_count: u32) -> Result<Self> {
        ArchiveHeader::new(file_count).write_to(&mut writer)?;
        Ok(Self {
            writer,
            declared: file_count,
            written: 0,
        })
    }

    /// Append the next entry
    pub fn append(&mut self, entry: &FileEntry) -> Result<()> {
        if self.written >= self.declared {
            return Err(SeafError::Validation(format!(
                "header declares {} entries, refusing to write more",
                self.declared
            )));
        }
        entry.write_to(&mut self.writer)?;
        self.written += 1;
        Ok(())
    }

    /// Number of entries written so far
    pub fn written(&self) -> u32 {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl ArchiveWriter<BufWriter<File>> {
    /// Create (or truncate) an archive file on disk
    pub fn create(path: &Path, file_count: u32) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), file_count)
    }
}

/// Sequential archive reader
/// Parses the header up front, then yields exactly `file_count` entries.
/// The declared count is trusted; bytes after the last entry are ignored.
pub struct ArchiveReader<R: Read> {
    reader: R,
    header: ArchiveHeader,
    remaining: u32,
    failed: bool,
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let header = ArchiveHeader::read_from(&mut reader)?;
        Ok(Self {
            reader,
            header,
            remaining: header.file_count,
            failed: false,
        })
    }

    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Read the next entry, or `None` once all declared entries are consumed
    pub fn next_entry(&mut self) -> Result<Option<FileEntry>> {
        if self.remaining == 0 || self.failed {
            return Ok(None);
        }
        match FileEntry::read_from(&mut self.reader) {
            Ok(entry) => {
                self.remaining -= 1;
                Ok(Some(entry))
            }
            Err(e) => {
                // No delimiter between entries, so nothing after a bad read is trustworthy
                self.failed = true;
                Err(e)
            }
        }
    }
}

impl ArchiveReader<BufReader<File>> {
    /// Open an archive file on disk and parse its header
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> Iterator for ArchiveReader<R> {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// Read just the header from an archive file
pub fn read_archive_header(path: &Path) -> Result<ArchiveHeader> {
    let file = File::open(path)?;
    ArchiveHeader::read_from(&mut BufReader::new(file))
}
