//! Line-oriented text files.
//!
//! The whole file is read and decoded up front, so no I/O happens once an
//! aggregation is running. Gzip input is decompressed transparently (see
//! [`compression`](crate::io::compression)).

use crate::error::{Error, Result};
use crate::io::compression::auto_detect_reader;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Text encodings understood by [`read_lines_vec`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8; a leading byte-order mark is skipped, invalid sequences are an error.
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value. Also used for ASCII.
    Latin1,
}

impl TextEncoding {
    /// Parse a charset label such as `"UTF-8"`, `"latin1"` or `"US-ASCII"`.
    ///
    /// # Errors
    /// Unknown labels are [`Error::InvalidArgument`].
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" | "us-ascii" | "ascii" => {
                Ok(TextEncoding::Latin1)
            }
            other => Err(Error::invalid(format!("unsupported text encoding {other:?}"))),
        }
    }

    fn decode(self, path: &Path, bytes: Vec<u8>) -> Result<String> {
        match self {
            TextEncoding::Utf8 => {
                let mut text = String::from_utf8(bytes)
                    .map_err(|e| Error::io(path, std::io::Error::new(ErrorKind::InvalidData, e)))?;
                if text.starts_with('\u{feff}') {
                    text.replace_range(..'\u{feff}'.len_utf8(), "");
                }
                Ok(text)
            }
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
        })
    }
}

/// Read `path` into one `String` per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped, empty lines are kept, and a
/// trailing newline does not produce an extra empty line. An empty file gives
/// an empty `Vec`.
///
/// # Errors
/// - [`Error::InvalidArgument`] for an empty path.
/// - [`Error::Io`] if the file cannot be opened, read or decoded.
pub fn read_lines_vec(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<Vec<String>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::invalid("line source path is empty"));
    }
    let f = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut rdr = auto_detect_reader(f, path).map_err(|e| Error::io(path, e))?;
    let mut bytes = Vec::new();
    rdr.read_to_end(&mut bytes).map_err(|e| Error::io(path, e))?;
    let text = encoding.decode(path, bytes)?;
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();
    debug!("read {} lines from {} ({encoding})", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn labels_parse_case_insensitively() -> Result<()> {
        assert_eq!(TextEncoding::from_label("UTF-8")?, TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_label(" Latin1 ")?, TextEncoding::Latin1);
        assert!(TextEncoding::from_label("klingon").unwrap_err().is_invalid_argument());
        Ok(())
    }

    #[test]
    fn crlf_and_bom_are_stripped() -> anyhow::Result<()> {
        let mut f = NamedTempFile::new()?;
        f.write_all("\u{feff}one\r\ntwo\n\nthree\n".as_bytes())?;
        let lines = read_lines_vec(f.path(), TextEncoding::Utf8)?;
        assert_eq!(lines, vec!["one", "two", "", "three"]);
        Ok(())
    }

    #[test]
    fn latin1_decodes_high_bytes() -> anyhow::Result<()> {
        let mut f = NamedTempFile::new()?;
        f.write_all(&[b'c', b'a', b'f', 0xe9, b'\n'])?;
        assert_eq!(read_lines_vec(f.path(), TextEncoding::Latin1)?, vec!["café"]);

        let err = read_lines_vec(f.path(), TextEncoding::Utf8).unwrap_err();
        assert!(matches!(
            err,
            Error::Io { ref source, .. } if source.kind() == ErrorKind::InvalidData
        ));
        Ok(())
    }
}
