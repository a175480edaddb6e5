pub mod compression;
pub mod lines;

#[cfg_attr(docsrs, doc(cfg(feature = "io-jsonl")))]
#[cfg(feature = "io-jsonl")]
pub mod jsonl;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;

pub use lines::{TextEncoding, read_lines_vec};
