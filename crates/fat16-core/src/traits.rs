//! The image-source contract.

use std::io::{Read, Seek};

/// A random-access byte source: the host image, wherever its bytes live.
///
/// The decoder never opens this itself — it is handed one by the caller
/// (a file, a `Cursor<Vec<u8>>` in tests, a raw device, a byte range carved
/// out of a larger container). Read + Seek is all FAT16 decoding needs.
pub trait ReadSeek: Read + Seek + Send {}

/// Blanket implementation for any type that implements Read + Seek.
impl<T: Read + Seek + Send> ReadSeek for T {}
