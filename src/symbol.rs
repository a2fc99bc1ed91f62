use std::borrow::Cow;
use std::io;
use std::io::{Error, ErrorKind};
use std::slice;

/// A single LZ77 symbol of a Snappy block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
	/// `length` bytes taken verbatim from the compressed stream, starting at
	/// stream index `start`.
	Literal { length: usize, start: usize },
	/// `length` bytes of already produced output, starting `offset` bytes
	/// behind the current output position.
	Copy { length: usize, offset: usize },
}

impl Symbol {

	/// Number of uncompressed bytes this symbol produces.
	pub fn len(&self) -> usize {
		match *self {
			Symbol::Literal { length, .. } => length,
			Symbol::Copy { length, .. } => length,
		}
	}

	pub fn is_literal(&self) -> bool {
		match *self {
			Symbol::Literal { .. } => true,
			Symbol::Copy { .. } => false,
		}
	}

	pub fn is_copy(&self) -> bool {
		!self.is_literal()
	}

	/// Returns the bytes this symbol contributes to the output.
	///
	/// `output` must hold exactly the bytes produced before this symbol.
	/// Literals borrow from `stream`. Copies borrow from `output` unless
	/// they overlap themselves (`length > offset`), in which case the
	/// repeating pattern is expanded byte by byte.
	pub fn get_bytes<'a>(&self, stream: &'a [u8], output: &'a [u8]) -> io::Result<Cow<'a, [u8]>> {
		match *self {
			Symbol::Literal { length, start } => {
				match literal_slice(stream, start, length) {
					Some(bytes) => Ok(Cow::Borrowed(bytes)),
					None => Err(Error::new(ErrorKind::InvalidInput, "snappy: literal exceeds compressed stream")),
				}
			},
			Symbol::Copy { length, offset } => {
				if offset == 0 || offset > output.len() {
					return Err(Error::new(ErrorKind::InvalidInput, "snappy: copy offset out of range"))
				}
				let src = output.len() - offset;
				if length <= offset {
					return Ok(Cow::Borrowed(&output[src..src + length]))
				}
				let pattern = &output[src..];
				Ok(Cow::Owned((0..length).map(|i| pattern[i % offset]).collect()))
			},
		}
	}

	/// Appends the bytes of this symbol to `out`, which holds all output
	/// produced so far.
	pub fn expand_into(&self, stream: &[u8], out: &mut Vec<u8>) -> io::Result<()> {
		match *self {
			Symbol::Literal { length, start } => {
				let bytes = match literal_slice(stream, start, length) {
					Some(bytes) => bytes,
					None => return Err(Error::new(ErrorKind::InvalidInput, "snappy: literal exceeds compressed stream")),
				};
				out.extend_from_slice(bytes);
			},
			Symbol::Copy { length, offset } => {
				if offset == 0 || offset > out.len() {
					return Err(Error::new(ErrorKind::InvalidInput, "snappy: copy offset out of range"))
				}
				let src = out.len() - offset;
				out.reserve(length);
				if length <= offset {
					out.extend_from_within(src..src + length);
				} else {
					// Overlapping copy, repeat the pattern
					for i in 0..length {
						let b = out[src + i];
						out.push(b);
					}
				}
			},
		}
		Ok(())
	}
}

// The literal bytes stream[start..start + length], if they lie within stream.
fn literal_slice(stream: &[u8], start: usize, length: usize) -> Option<&[u8]> {
	start.checked_add(length).and_then(|end| stream.get(start..end))
}

/// Bookkeeping for one decoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSymbol {
	/// Stream position of the symbol's tag byte.
	pub cursor: usize,
	/// Encoded bytes consumed, literal payload included.
	pub width: usize,
	/// Output position before this symbol.
	pub dst_pos: usize,
	pub symbol: Symbol,
}

impl DecodedSymbol {

	/// Output position just past this symbol.
	pub fn dst_end(&self) -> usize {
		self.dst_pos + self.symbol.len()
	}

	/// Stream position just past this symbol.
	pub fn cursor_end(&self) -> usize {
		self.cursor + self.width
	}
}

/// Symbols of one decode call, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
	symbols: Vec<DecodedSymbol>,
	uncompressed_len: usize,
}

impl DecodeResult {

	pub(crate) fn new(uncompressed_len: usize) -> DecodeResult {
		DecodeResult {
			symbols: Vec::new(),
			uncompressed_len: uncompressed_len,
		}
	}

	pub(crate) fn push(&mut self, symbol: DecodedSymbol) {
		self.symbols.push(symbol);
	}

	pub fn symbols(&self) -> &[DecodedSymbol] {
		&self.symbols
	}

	pub fn iter(&self) -> slice::Iter<DecodedSymbol> {
		self.symbols.iter()
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// The uncompressed length the caller asked for.
	pub fn uncompressed_len(&self) -> usize {
		self.uncompressed_len
	}

	/// Uncompressed bytes covered by the decoded symbols.
	pub fn produced_len(&self) -> usize {
		self.symbols.last().map_or(0, |s| s.dst_end())
	}

	/// True if decoding stopped because every requested byte was produced,
	/// false if it stopped at a truncated or invalid symbol.
	pub fn is_complete(&self) -> bool {
		self.produced_len() == self.uncompressed_len
	}

	/// Stream position just past the last decoded symbol.
	pub fn end_cursor(&self) -> Option<usize> {
		self.symbols.last().map(|s| s.cursor_end())
	}

	pub fn into_symbols(self) -> Vec<DecodedSymbol> {
		self.symbols
	}
}

impl<'a> IntoIterator for &'a DecodeResult {
	type Item = &'a DecodedSymbol;
	type IntoIter = slice::Iter<'a, DecodedSymbol>;

	fn into_iter(self) -> Self::IntoIter {
		self.symbols.iter()
	}
}

// Rebuilds the uncompressed output of decoded symbols.
// Copies reference earlier output, so an explicit buffer is grown symbol by symbol.
pub fn process_symbols(stream: &[u8], result: &DecodeResult) -> io::Result<Vec<u8>> {
	let mut out: Vec<u8> = Vec::with_capacity(result.produced_len());
	for s in result {
		if s.dst_pos != out.len() {
			return Err(Error::new(ErrorKind::InvalidInput, "snappy: corrupt input"))
		}
		s.symbol.expand_into(stream, &mut out)?;
	}
	Ok(out)
}
