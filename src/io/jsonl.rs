//! JSON Lines (JSONL) record files.
//!
//! One JSON document per line; blank lines are skipped. Compressed inputs are
//! detected automatically.

use crate::error::{Error, Result};
use crate::io::compression::auto_detect_reader;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a JSONL file into a typed `Vec<T>`.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be opened or read.
/// - [`Error::Parse`] naming the 1-based line that failed to deserialize.
pub fn read_jsonl_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::invalid("JSONL source path is empty"));
    }
    let f = File::open(path).map_err(|e| Error::io(path, e))?;
    let rdr = BufReader::new(auto_detect_reader(f, path).map_err(|e| Error::io(path, e))?);
    let mut out = Vec::<T>::new();
    for (i, line) in rdr.lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let v: T = serde_json::from_str(&line).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            record: i + 1,
            message: e.to_string(),
        })?;
        out.push(v);
    }
    debug!("read {} JSONL records from {}", out.len(), path.display());
    Ok(out)
}
