//! # Config File I/O
//!
//! Whole-file reads and writes. Each call opens the file, does its work and
//! closes it before returning, on success and on failure alike.
//!
//! Writes truncate in place: there is no locking and no atomic rename, so a
//! crash mid-write can leave a partial file.

use errors::ConfigError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const BOM: char = '\u{feff}';

/// Text encoding of config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Strict UTF-8; invalid bytes fail the read.
    #[default]
    Utf8,
    /// UTF-8 with a byte-order mark: written on save, stripped on load.
    Utf8Sig,
}

impl Encoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Sig => "utf-8-sig",
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(Encoding::Utf8Sig),
            other => Err(format!("Unsupported encoding: {other}")),
        }
    }
}

/// Reads the whole file at `path` as text.
pub fn read_text(path: &Path, encoding: Encoding) -> Result<String, ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::io(path, e))?;
    let size = bytes.len();
    let text = String::from_utf8(bytes)
        .map_err(|e| ConfigError::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;

    debug!(
        path = %path.display(),
        bytes = size,
        encoding = encoding.as_str(),
        "Read config file",
    );

    Ok(match encoding {
        Encoding::Utf8Sig => match text.strip_prefix(BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        },
        Encoding::Utf8 => text,
    })
}

/// Replaces the file at `path` with `text`, creating it if needed.
pub fn write_text(path: &Path, text: &str, encoding: Encoding) -> Result<(), ConfigError> {
    let mut file = File::create(path).map_err(|e| ConfigError::io(path, e))?;

    let mut written = 0;
    if encoding == Encoding::Utf8Sig {
        let mut buf = [0u8; 3];
        let bom = BOM.encode_utf8(&mut buf);
        file.write_all(bom.as_bytes())
            .map_err(|e| ConfigError::io(path, e))?;
        written += bom.len();
    }
    file.write_all(text.as_bytes())
        .map_err(|e| ConfigError::io(path, e))?;
    file.flush().map_err(|e| ConfigError::io(path, e))?;
    written += text.len();

    debug!(
        path = %path.display(),
        bytes = written,
        encoding = encoding.as_str(),
        "Wrote config file",
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.txt");

        write_text(&path, "name = \"x\"\n", Encoding::Utf8).unwrap();
        assert_eq!(read_text(&path, Encoding::Utf8).unwrap(), "name = \"x\"\n");
    }

    #[test]
    fn test_bom_written_and_stripped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.json");

        write_text(&path, "{}", Encoding::Utf8Sig).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"\xEF\xBB\xBF{}");
        assert_eq!(read_text(&path, Encoding::Utf8Sig).unwrap(), "{}");
        // Plain UTF-8 keeps the mark as text.
        assert_eq!(read_text(&path, Encoding::Utf8).unwrap(), "\u{feff}{}");
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [0x63, 0x61, 0x66, 0xE9]).unwrap();

        let err = read_text(&path, Encoding::Utf8).unwrap_err();
        match err {
            ConfigError::Io { source, .. } => assert_eq!(source.kind(), io::ErrorKind::InvalidData),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_text(Path::new("/nonexistent/path/config.toml"), Encoding::Utf8).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("utf_8_sig".parse::<Encoding>().unwrap(), Encoding::Utf8Sig);
        assert!("latin-1".parse::<Encoding>().is_err());
    }
}
