use std::io;
use std::io::{Error, ErrorKind};

use log::debug;

use crate::decode::decode_symbols;
use crate::definitions::*;
use crate::symbol::process_symbols;

// decompressed_len returns the length of the decoded block and the number of
// bytes taken by its varint-encoded header.
pub fn decompressed_len(src: &[u8]) -> io::Result<(usize, usize)> {
	let mut n: u64 = 0;
	let mut shift: u32 = 0;
	for (i, &b) in src.iter().take(MAX_VARINT_LEN).enumerate() {
		n |= ((b & 0x7f) as u64) << shift;
		if b < 0x80 {
			if n > MAX_STREAM_SIZE {
				return Err(Error::new(ErrorKind::InvalidInput, "snappy: decoded block is too large"))
			}
			return Ok((n as usize, i + 1))
		}
		shift += 7;
	}
	Err(Error::new(ErrorKind::InvalidInput, "snappy: invalid varint header"))
}

// Decompress writes the decoded form of the block src into dst and returns the
// length written.
// Returns an error if dst was not large enough to hold the entire decoded
// block, or if the symbols of src do not add up to the length in its header.
pub fn decompress(dst: &mut [u8], src: &[u8]) -> io::Result<usize> {
	let (d_len, header_len) = decompressed_len(src)?;

	if dst.len() < d_len {
		return Err(Error::new(ErrorKind::InvalidInput, "snappy: destination buffer is too short"));
	}

	let decoded = decompress_vec(src)?;
	dst[..decoded.len()].copy_from_slice(&decoded);
	debug!("decompressed {} bytes from {} (header {} bytes)", decoded.len(), src.len(), header_len);
	Ok(decoded.len())
}

// decompress_vec returns the decoded form of the block src in a new buffer.
pub fn decompress_vec(src: &[u8]) -> io::Result<Vec<u8>> {
	let (d_len, header_len) = decompressed_len(src)?;

	let symbols = decode_symbols(src, d_len, header_len)?;
	if !symbols.is_complete() {
		debug!("block ends after {} of {} bytes", symbols.produced_len(), d_len);
		return Err(Error::new(ErrorKind::InvalidInput, "snappy: corrupt input"));
	}
	// Trailing bytes after the last symbol
	if symbols.end_cursor().unwrap_or(header_len) != src.len() {
		return Err(Error::new(ErrorKind::InvalidInput, "snappy: corrupt input"));
	}

	process_symbols(src, &symbols)
}
