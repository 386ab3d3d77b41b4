use serde::Serialize;

/// Size and entropy figures for one archived file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryStats {
    pub name: String,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Payload bytes on disk (nonce + ciphertext + tag)
    pub stored_size: u64,
    /// Shannon entropy of the original bytes, normalized to 0..1
    pub entropy: f64,
}

impl EntryStats {
    /// Compressed size as a percentage of the original
    pub fn compression_ratio(&self) -> f64 {
        percent(self.compressed_size, self.original_size)
    }

    /// Stored minus original, in bytes
    pub fn overhead(&self) -> i64 {
        self.stored_size as i64 - self.original_size as i64
    }
}

/// Result of archive creation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveReport {
    pub entries: Vec<EntryStats>,
}

impl ArchiveReport {
    pub fn total_original(&self) -> u64 {
        self.entries.iter().map(|e| e.original_size).sum()
    }

    pub fn total_compressed(&self) -> u64 {
        self.entries.iter().map(|e| e.compressed_size).sum()
    }

    pub fn total_stored(&self) -> u64 {
        self.entries.iter().map(|e| e.stored_size).sum()
    }

    /// Render the per-file and total figures for the terminal
    pub fn render(&self) -> String {
        let mut output = String::new();

        for entry in &self.entries {
            output.push_str(&format!("--- {} ---\n", entry.name));
            output.push_str(&format!(
                "  Original size: {} bytes ({})\n",
                entry.original_size,
                format_size(entry.original_size)
            ));
            output.push_str(&format!(
                "  Entropy: {:.4} (0-1, higher compresses worse)\n",
                entry.entropy
            ));
            output.push_str(&format!(
                "  Compressed: {} bytes, ratio {:.2}%\n",
                entry.compressed_size,
                entry.compression_ratio()
            ));
            output.push_str(&format!("  Stored: {} bytes\n", entry.stored_size));
            output.push_str(&format!("  Overhead: {:+} bytes\n", entry.overhead()));
        }

        let original = self.total_original();
        let compressed = self.total_compressed();
        let stored = self.total_stored();
        output.push_str("=== Totals ===\n");
        output.push_str(&format!("  Files: {}\n", self.entries.len()));
        output.push_str(&format!("  Original: {}\n", format_size(original)));
        output.push_str(&format!("  Compressed: {}\n", format_size(compressed)));
        output.push_str(&format!("  Stored: {}\n", format_size(stored)));
        output.push_str(&format!(
            "  Compression: {:.2}%\n",
            percent(compressed, original)
        ));
        let overhead = if original == 0 {
            0.0
        } else {
            (stored as f64 - original as f64) / original as f64 * 100.0
        };
        output.push_str(&format!("  Archive overhead: {:.2}%\n", overhead));

        output
    }
}

/// Shannon entropy in bits per byte, divided by 8
pub fn entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut freq = [0usize; 256];
    for &b in data {
        freq[b as usize] += 1;
    }

    let len = data.len() as f64;
    let bits: f64 = freq
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum();

    bits / 8.0
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
