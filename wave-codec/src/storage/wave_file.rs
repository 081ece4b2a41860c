use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::error::WaveError;

/// Outcome of writing a WAVE file to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub file_path: PathBuf,
    /// Total bytes written, header included.
    pub bytes_written: u64,
    /// Lowercase SHA-256 hex digest of the written bytes.
    pub checksum: String,
}

/// Read a whole file into memory for parsing.
pub fn read_source(path: &Path) -> Result<Vec<u8>, WaveError> {
    fs::read(path).map_err(|e| WaveError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Drain an arbitrary byte source into memory for parsing.
pub fn read_stream<R: Read>(mut reader: R) -> Result<Vec<u8>, WaveError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| WaveError::SourceUnavailable {
            path: "<stream>".into(),
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

/// Buffered file writer that counts and digests everything written.
///
/// The file handle is released when the writer is closed or dropped, so an
/// error anywhere in a write still closes the destination.
pub struct WaveFileWriter {
    file_path: PathBuf,
    file: BufWriter<File>,
    hasher: Sha256,
    total_bytes_written: u64,
}

impl WaveFileWriter {
    /// Create (or truncate) the destination file.
    pub fn create(file_path: &Path) -> Result<Self, WaveError> {
        let file = File::create(file_path).map_err(|e| WaveError::DestinationUnavailable {
            path: file_path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            file_path: file_path.to_path_buf(),
            file: BufWriter::new(file),
            hasher: Sha256::new(),
            total_bytes_written: 0,
        })
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.total_bytes_written
    }

    /// Flush buffered bytes and close the file.
    pub fn close(mut self) -> Result<WriteSummary, WaveError> {
        self.file
            .flush()
            .map_err(|e| WaveError::WriteFailed(format!("flush failed: {}", e)))?;

        let checksum = hex_encode(&self.hasher.finalize());
        Ok(WriteSummary {
            file_path: self.file_path,
            bytes_written: self.total_bytes_written,
            checksum,
        })
    }
}

impl Write for WaveFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.file.write(buf)?;
        self.hasher.update(&buf[..written]);
        self.total_bytes_written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// SHA-256 hex digest of a file on disk.
pub fn sha256_file(path: &Path) -> Result<String, WaveError> {
    let data = read_source(path)?;
    Ok(hex_encode(&Sha256::digest(&data)))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_counts_and_digests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digest.bin");

        let mut writer = WaveFileWriter::create(&path).unwrap();
        writer.write_all(b"RIFF").unwrap();
        writer.write_all(&[0u8; 40]).unwrap();
        assert_eq!(writer.bytes_written(), 44);

        let summary = writer.close().unwrap();
        assert_eq!(summary.bytes_written, 44);
        assert_eq!(summary.checksum.len(), 64);
        assert_eq!(summary.checksum, sha256_file(&path).unwrap());
        assert_eq!(fs::read(&path).unwrap().len(), 44);
    }

    #[test]
    fn empty_digest_is_known_constant() {
        let dir = tempfile::tempdir().unwrap();
        let summary = WaveFileWriter::create(&dir.path().join("empty.wav"))
            .unwrap()
            .close()
            .unwrap();
        assert_eq!(
            summary.checksum,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn missing_source_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(&dir.path().join("nope.wav")).unwrap_err();
        assert!(matches!(err, WaveError::SourceUnavailable { .. }));
    }

    #[test]
    fn unwritable_destination_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.wav");
        assert!(matches!(
            WaveFileWriter::create(&path),
            Err(WaveError::DestinationUnavailable { .. })
        ));
    }

    #[test]
    fn read_stream_drains_reader() {
        let bytes = read_stream(&b"RIFF...."[..]).unwrap();
        assert_eq!(bytes, b"RIFF....");
    }
}
