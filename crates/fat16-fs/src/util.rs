//! Internal read helper shared by the boot-block decoder, the FAT chain
//! walker, the cluster reader, and the directory iterator.

use fat16_core::ReadSeek;
use std::io;

/// Read into `buf` until it is full or the source stops yielding bytes.
///
/// This is `Read::read_exact` with the "stopped early" case turned into a
/// return value instead of an `UnexpectedEof` error, matching the
/// `ImageSource` contract's `read(buffer, n) -> bytes_read` semantics: a
/// short read is information the caller acts on, not a failure.
pub(crate) fn read_fill(source: &mut dyn ReadSeek, buf: &mut [u8]) -> io::Result<usize> {
    use std::io::Read;

    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
