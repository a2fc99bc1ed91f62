use std::io;
use std::io::{Error, ErrorKind};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::definitions::*;
use crate::symbol::{DecodeResult, DecodedSymbol, Symbol};

/// The four classes a tag byte can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
	/// xxxxxx01: copy with 3-bit length, 11-bit offset
	Copy1,
	/// xxxxxx1x: copy with 6-bit length, 2-byte or 4-byte offset
	Copy2,
	/// 0000xx00: literal with its length packed into the tag
	ShortLiteral,
	/// xxxxxx00: literal, possibly followed by 1-4 length bytes
	Literal,
}

impl TagClass {

	pub fn of(b0: u8) -> TagClass {
		if b0 & 0x03 != TAG_LITERAL {
			if b0 & 0x03 == TAG_COPY_1 {
				TagClass::Copy1
			} else {
				TagClass::Copy2
			}
		} else if b0 < SHORT_LITERAL_LIMIT {
			TagClass::ShortLiteral
		} else {
			TagClass::Literal
		}
	}

	pub fn is_literal(self) -> bool {
		match self {
			TagClass::ShortLiteral | TagClass::Literal => true,
			TagClass::Copy1 | TagClass::Copy2 => false,
		}
	}
}

// tag_len returns the number of bytes taken by the tag byte b0 and the length or
// offset bytes that follow it. Literal payload bytes are not included.
pub fn tag_len(b0: u8) -> usize {
	match TagClass::of(b0) {
		TagClass::Copy1 => 2,
		TagClass::Copy2 => if b0 & 0x03 == TAG_COPY_4 { 5 } else { 3 },
		TagClass::ShortLiteral => 1,
		TagClass::Literal => {
			let m = b0 >> 2;
			if m >= LITERAL_EXTRA_LEN_BASE {
				1 + (m - (LITERAL_EXTRA_LEN_BASE - 1)) as usize
			} else {
				1
			}
		},
	}
}

/// Decoder state after one successfully parsed symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed {
	/// Stream position just past the symbol.
	pub cursor: usize,
	pub bytes_left: usize,
	pub dst_pos: usize,
	pub symbol: Symbol,
}

/// Parses the symbol whose tag byte sits at `cursor`.
///
/// Returns `None` when the symbol cannot be taken: its encoding runs past the
/// end of `stream`, it produces more than `bytes_left` bytes, or it is a copy
/// reaching before the start of the output (`dst_pos` bytes produced so far).
pub fn parse_symbol(stream: &[u8], cursor: usize, bytes_left: usize, dst_pos: usize) -> Option<Parsed> {
	let b0 = match stream.get(cursor) {
		Some(&b) => b,
		None => {
			trace!("cursor={}: end of stream", cursor);
			return None
		}
	};
	let class = TagClass::of(b0);
	let header_len = tag_len(b0);
	let header = match stream.get(cursor..cursor + header_len) {
		Some(header) => header,
		None => {
			trace!("cursor={}: truncated {:?} tag, header_len={}", cursor, class, header_len);
			return None
		}
	};

	let (symbol, width) = match class {

		// Parse a Copy1 Symbol
		TagClass::Copy1 => {
			trace!("cursor={}: found copy with 3-bit length, 11-bit offset", cursor);
			let offset = (((b0 & 0xe0) as usize) << 3) | header[1] as usize;
			let length = ((b0 >> 2) & 0x07) as usize + 4;
			(Symbol::Copy { length: length, offset: offset }, header_len)
		},

		// Parse a Copy2 or Copy4 Symbol
		TagClass::Copy2 => {
			trace!("cursor={}: found copy with 6-bit length, {}-byte offset", cursor, header_len - 1);
			let offset = if header_len == 5 {
				LittleEndian::read_u32(&header[1..]) as usize
			} else {
				LittleEndian::read_u16(&header[1..]) as usize
			};
			let length = (b0 >> 2) as usize + 1;
			debug_assert!(length <= MAX_COPY_LENGTH);
			(Symbol::Copy { length: length, offset: offset }, header_len)
		},

		// Parse a Literal Symbol
		TagClass::ShortLiteral | TagClass::Literal => {
			trace!("cursor={}: found {:?}", cursor, class);
			let m = (b0 >> 2) as u64;
			let blen = if header_len > 1 {
				LittleEndian::read_uint(&header[1..], header_len - 1) + 1
			} else {
				m + 1
			};
			if (bytes_left as u64) < blen {
				trace!("cursor={}: not enough bytes left to construct literal, bytes_left={}, blen={}", cursor, bytes_left, blen);
				return None
			}
			let length = blen as usize;
			let start = cursor + header_len;
			if length > stream.len() - start {
				trace!("cursor={}: literal runs past end of stream, blen={}", cursor, blen);
				return None
			}
			(Symbol::Literal { length: length, start: start }, header_len + length)
		},
	};

	if let Symbol::Copy { length, offset } = symbol {
		if offset == 0 || offset > dst_pos || bytes_left < length {
			trace!("cursor={}: out of range or not enough bytes left, offset={}, dst_pos={}, bytes_left={}, blen={}",
				cursor, offset, dst_pos, bytes_left, length);
			return None
		}
	}

	let length = symbol.len();
	Some(Parsed {
		cursor: cursor + width,
		bytes_left: bytes_left - length,
		dst_pos: dst_pos + length,
		symbol: symbol,
	})
}

// decode_symbols walks the symbols of stream starting with the tag byte at offset
// until uncompressed_len output bytes are covered.
// A symbol that cannot be parsed ends the walk without an error; the result then
// covers fewer bytes than requested (see DecodeResult::is_complete).
// Returns an error only if offset lies beyond the end of stream.
pub fn decode_symbols(stream: &[u8], uncompressed_len: usize, offset: usize) -> io::Result<DecodeResult> {
	if offset > stream.len() {
		return Err(Error::new(ErrorKind::InvalidInput, "snappy: start offset beyond end of stream"))
	}

	let mut result = DecodeResult::new(uncompressed_len);
	let mut cursor = offset;
	let mut bytes_left = uncompressed_len;
	let mut dst_pos: usize = 0;
	debug!("decoding symbols, bytes_left={}, cursor={}", bytes_left, cursor);

	while bytes_left > 0 {
		let parsed = match parse_symbol(stream, cursor, bytes_left, dst_pos) {
			Some(parsed) => parsed,
			None => {
				debug!("stopped at cursor={}, bytes_left={}", cursor, bytes_left);
				break
			}
		};
		result.push(DecodedSymbol {
			cursor: cursor,
			width: parsed.cursor - cursor,
			dst_pos: dst_pos,
			symbol: parsed.symbol,
		});
		cursor = parsed.cursor;
		bytes_left = parsed.bytes_left;
		dst_pos = parsed.dst_pos;
	}

	debug!("decoded {} symbols covering {} of {} bytes", result.len(), result.produced_len(), uncompressed_len);
	Ok(result)
}

// decode_symbols_from_start is decode_symbols with the first tag byte at index 0.
pub fn decode_symbols_from_start(stream: &[u8], uncompressed_len: usize) -> io::Result<DecodeResult> {
	decode_symbols(stream, uncompressed_len, 0)
}
