//! Reference computation of the len3 mask.
//!
//! Vectorised Snappy decoders classify symbols in bulk: a run of raw tag bits
//! tells for each symbol whether it is encoded in 2 or 3 bytes. The len3 mask
//! compacts that run into one output bit per symbol. A `0` bit consumes 2
//! input bits and a `1` bit consumes 3, so the number of input bits behind a
//! full mask varies between `2 * limit` and `3 * limit`.
//!
//! Input bits are taken from the end of a big-endian [`BitSequence`], i.e.
//! starting with the least significant bit of the first word. The first
//! computed mask bit is the least significant output bit.

use std::fmt;
use std::io;
use std::io::{Error, ErrorKind};

use log::debug;

use crate::definitions::LEN3_MASK_LIMIT;

/// The bits of consecutive 64-bit words, read as one big-endian sequence.
///
/// Logical position 0 is the most significant bit of the last word; the last
/// position is the least significant bit of the first word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
	words: Vec<u64>,
}

impl BitSequence {

	pub fn from_words(words: &[u64]) -> BitSequence {
		BitSequence { words: words.to_vec() }
	}

	pub fn words(&self) -> &[u64] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len() * 64
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// The bit at logical position `pos`.
	///
	/// Panics if `pos >= self.len()`.
	pub fn bit(&self, pos: usize) -> bool {
		self.bit_from_end(self.len() - 1 - pos)
	}

	// Bit k counted back from the last logical position.
	fn bit_from_end(&self, k: usize) -> bool {
		(self.words[k / 64] >> (k % 64)) & 1 == 1
	}
}

impl fmt::Display for BitSequence {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for w in self.words.iter().rev() {
			write!(f, "{:064b}", w)?;
		}
		Ok(())
	}
}

// to_bitsequence concatenates the big-endian bits of words, each new word in
// front of the ones before it.
pub fn to_bitsequence(words: &[u64]) -> BitSequence {
	BitSequence::from_words(words)
}

/// A computed len3 mask.
///
/// Mask bit `i` lives in bit `i % 64` of word `i / 64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Len3Mask {
	words: Vec<u64>,
	limit: usize,
	consumed_bits: usize,
}

impl Len3Mask {

	/// The first 64 mask bits, first computed bit in bit 0.
	pub fn bits(&self) -> u64 {
		self.words.first().cloned().unwrap_or(0)
	}

	/// All mask bits, 64 per word.
	pub fn words(&self) -> &[u64] {
		&self.words
	}

	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Input bits used to produce the mask.
	pub fn consumed_bits(&self) -> usize {
		self.consumed_bits
	}

	/// True if the `i`-th symbol of the window is a 3-byte symbol.
	pub fn is_len3(&self, i: usize) -> bool {
		i < self.limit && (self.words[i / 64] >> (i % 64)) & 1 == 1
	}

	pub fn len3_count(&self) -> u32 {
		self.words.iter().map(|w| w.count_ones()).sum()
	}
}

// Renders the mask as limit '0'/'1' characters, most significant first.
impl fmt::Display for Len3Mask {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for i in (0..self.limit).rev() {
			f.write_str(if self.is_len3(i) { "1" } else { "0" })?;
		}
		Ok(())
	}
}

// len3_mask computes limit mask bits from the end of seq.
// Returns an error if seq runs out of bits before limit bits are computed.
pub fn len3_mask(seq: &BitSequence, limit: usize) -> io::Result<Len3Mask> {
	let total = seq.len();
	let mut consumed: usize = 0;
	let mut words: Vec<u64> = vec![0; (limit + 63) / 64];

	for i in 0..limit {
		let remaining = total - consumed;
		let len3 = remaining > 0 && seq.bit_from_end(consumed);
		let cost = if len3 { 3 } else { 2 };
		if cost > remaining {
			debug!("len3 mask input exhausted after {} of {} bits, total={}", i, limit, total);
			return Err(Error::new(ErrorKind::InvalidInput, "snappy: len3 mask input sequence too short"))
		}
		if len3 {
			words[i / 64] |= 1u64 << (i % 64);
		}
		consumed += cost;
	}

	debug!("len3 mask of {} bits consumed {} of {} bits", limit, consumed, total);
	Ok(Len3Mask {
		words: words,
		limit: limit,
		consumed_bits: consumed,
	})
}

// len3_mask_64 computes a 64-bit mask over words.
pub fn len3_mask_64(words: &[u64]) -> io::Result<Len3Mask> {
	len3_mask(&to_bitsequence(words), LEN3_MASK_LIMIT)
}
