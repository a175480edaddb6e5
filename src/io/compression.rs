//! Pluggable decompression for file-backed sequences.
//!
//! Readers returned by [`auto_detect_reader`] transparently decompress input
//! when a registered [`CompressionCodec`] matches the file:
//!
//! 1. by file extension (fast path, case-insensitive),
//! 2. otherwise by magic bytes at the start of the stream,
//! 3. otherwise the stream is passed through unchanged.
//!
//! Built-in codecs:
//! - **Gzip** (`.gz`, `.gzip`, magic `1f 8b`) via `flate2` (feature: `compression-gzip`)
//!
//! Custom codecs can be added at runtime with [`register_codec`].
//!
//! ```no_run
//! use keyfold::io::compression::auto_detect_reader;
//! use std::fs::File;
//! use std::io::Read;
//! # fn main() -> std::io::Result<()> {
//!
//! let file = File::open("events.log.gz")?;
//! let mut text = String::new();
//! auto_detect_reader(file, "events.log.gz")?.read_to_string(&mut text)?;
//! # Ok(())
//! # }
//! ```

use log::trace;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Global codec registry, lazily seeded with the built-in codecs.
static CODEC_REGISTRY: RwLock<Option<Vec<Arc<dyn CompressionCodec>>>> = RwLock::new(None);

fn init_registry() -> Vec<Arc<dyn CompressionCodec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Arc::new(GzipCodec),
    ]
}

fn get_registry() -> Vec<Arc<dyn CompressionCodec>> {
    let mut lock = CODEC_REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    lock.get_or_insert_with(init_registry).clone()
}

/// Register a custom codec; it is consulted after the built-in ones.
///
/// ```
/// use keyfold::io::compression::{register_codec, CompressionCodec};
/// use std::io::Read;
/// use std::sync::Arc;
///
/// struct Identity;
/// impl CompressionCodec for Identity {
///     fn name(&self) -> &str { "identity" }
///     fn extensions(&self) -> &[&str] { &[".ident"] }
///     fn magic_bytes(&self) -> Option<&[u8]> { None }
///     fn wrap_reader_dyn(&self, r: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> { Ok(r) }
/// }
///
/// register_codec(Arc::new(Identity));
/// ```
pub fn register_codec(codec: Arc<dyn CompressionCodec>) {
    let mut lock = CODEC_REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    lock.get_or_insert_with(init_registry).push(codec);
}

/// A decompression algorithm the line and record readers can detect.
///
/// Implementations live in a global registry and must be `Send + Sync`.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip").
    fn name(&self) -> &str;

    /// Lowercase extensions including the leading dot (e.g., `&[".gz"]`).
    fn extensions(&self) -> &[&str];

    /// Leading byte signature, if the format has a reliable one.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wrap `reader` so that reads yield decompressed bytes.
    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>>;
}

fn detect_from_extension(path: &Path) -> Option<Arc<dyn CompressionCodec>> {
    let path_str = path.to_string_lossy().to_lowercase();
    get_registry()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

/// Peek (without consuming) at the buffered head of `reader`.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Arc<dyn CompressionCodec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    get_registry()
        .into_iter()
        .find(|codec| codec.magic_bytes().is_some_and(|magic| buf.starts_with(magic)))
}

/// Wrap `reader` with a decompressor if the path or the content calls for one.
///
/// # Errors
/// Propagates I/O errors from peeking at the stream or initialising the codec.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> std::io::Result<Box<dyn Read>> {
    let path_hint = path_hint.as_ref();
    if let Some(codec) = detect_from_extension(path_hint) {
        trace!("{}: {} codec by extension", path_hint.display(), codec.name());
        return codec.wrap_reader_dyn(Box::new(reader));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        trace!("{}: {} codec by magic bytes", path_hint.display(), codec.name());
        return codec.wrap_reader_dyn(Box::new(buf_reader));
    }

    Ok(Box::new(buf_reader))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader_dyn(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        use flate2::read::MultiGzDecoder;
        Ok(Box::new(MultiGzDecoder::new(reader)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn plain_bytes_pass_through() -> std::io::Result<()> {
        let mut out = String::new();
        auto_detect_reader(Cursor::new(b"a\nb\n".to_vec()), "plain.txt")?.read_to_string(&mut out)?;
        assert_eq!(out, "a\nb\n");
        Ok(())
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn gzip_detected_by_magic_without_extension() -> std::io::Result<()> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello\nworld\n")?;
        let bytes = enc.finish()?;

        let mut out = String::new();
        auto_detect_reader(Cursor::new(bytes), "no-extension")?.read_to_string(&mut out)?;
        assert_eq!(out, "hello\nworld\n");
        Ok(())
    }
}
