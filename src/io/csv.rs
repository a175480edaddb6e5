//! CSV record files, deserialized with serde.

use crate::error::{Error, Result};
use crate::io::compression::auto_detect_reader;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Read a CSV file into a typed `Vec<T>`.
///
/// With `has_headers`, the first row names the fields and is not returned.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be opened.
/// - [`Error::Parse`] naming the 1-based record that failed to deserialize.
pub fn read_csv_vec<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    has_headers: bool,
) -> Result<Vec<T>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::invalid("CSV source path is empty"));
    }
    let f = File::open(path).map_err(|e| Error::io(path, e))?;
    let rdr = auto_detect_reader(f, path).map_err(|e| Error::io(path, e))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(has_headers).from_reader(rdr);
    let mut out = Vec::<T>::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        let v = rec.map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::io(path, io),
            kind => Error::Parse {
                path: path.to_path_buf(),
                record: i + 1,
                message: format!("{kind:?}"),
            },
        })?;
        out.push(v);
    }
    debug!("read {} CSV records from {}", out.len(), path.display());
    Ok(out)
}
