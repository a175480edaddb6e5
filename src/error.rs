//! Error taxonomy for aggregation calls.
//!
//! Every public entry point returns [`Result<T>`]. The variants map onto the
//! four ways a call can fail:
//!
//! - [`Error::InvalidArgument`] - a missing source or a bad runner setting,
//!   detected before any element is touched.
//! - [`Error::Io`] / [`Error::Parse`] - only raised by the sequence adapters
//!   while reading files, i.e. before accumulation starts.
//! - [`Error::DuplicateKey`] - a key collision in a map reducer that was built
//!   without a merge function.
//! - [`Error::Caller`] - a caller-supplied fallible function returned an error.
//!   The original `anyhow::Error` is kept intact: display and source delegate
//!   to it, and [`Error::caller_error`] hands it back for downcasting.
//!
//! None of these are retried internally; a failed call never yields a partial
//! result.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by every `keyfold` entry point.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse failure in {} at record {record}: {message}", path.display())]
    Parse {
        path: PathBuf,
        record: usize,
        message: String,
    },

    #[error("duplicate key {key} (supply a merge function to combine colliding values)")]
    DuplicateKey { key: String },

    #[error(transparent)]
    Caller(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// The caller's original error, if this failure came from a caller-supplied function.
    pub fn caller_error(&self) -> Option<&anyhow::Error> {
        match self {
            Error::Caller(e) => Some(e),
            _ => None,
        }
    }

    /// `true` for [`Error::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// `true` for [`Error::DuplicateKey`].
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Error::DuplicateKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn caller_errors_pass_through_unchanged() {
        #[derive(Debug, thiserror::Error)]
        #[error("bad row {0}")]
        struct BadRow(u32);

        let err: Error = anyhow::Error::new(BadRow(7)).into();
        assert_eq!(err.to_string(), "bad row 7");
        let inner = err.caller_error().expect("caller variant");
        assert_eq!(inner.downcast_ref::<BadRow>().map(|b| b.0), Some(7));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = Error::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn duplicate_key_mentions_merge_function() {
        let err = Error::DuplicateKey {
            key: "\"a\"".into(),
        };
        assert!(err.is_duplicate_key());
        assert!(err.to_string().contains("merge function"));
    }
}
