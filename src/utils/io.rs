// I/O utilities for reading FLAC metadata

use std::io::{self, ErrorKind, Read};

/// Read big-endian 32-bit integer
pub fn read_be_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_be_bytes(buffer))
}

/// Read little-endian 32-bit integer
pub fn read_le_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Fill `buffer` completely, or report a stream that was already exhausted
///
/// Returns `Ok(false)` when not a single byte was available. A stream that ends
/// part way through the buffer is an `UnexpectedEof` error.
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(ErrorKind::UnexpectedEof.into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

/// Read exactly `len` bytes into a new buffer
///
/// The buffer grows with the data actually read, so a corrupt length can't
/// trigger a huge allocation up front.
pub fn read_bytes<R: Read>(reader: &mut R, len: u32) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(u64::from(len)).read_to_end(&mut buffer)?;
    if buffer.len() as u64 != u64::from(len) {
        return Err(ErrorKind::UnexpectedEof.into());
    }
    Ok(buffer)
}

/// Discard exactly `len` bytes from a reader that can't seek
pub fn skip_bytes<R: Read>(reader: &mut R, len: u64) -> io::Result<()> {
    let skipped = io::copy(&mut reader.take(len), &mut io::sink())?;
    if skipped != len {
        return Err(ErrorKind::UnexpectedEof.into());
    }
    Ok(())
}
