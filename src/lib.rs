
// Definitions
pub mod definitions {

	//
	// Each encoded block begins with the varint-encoded length of the decoded data,
	// followed by a sequence of symbols. Symbols begin and end on byte boundaries.
	// The first byte of each symbol (the tag byte) is broken into its 2 least and
	// 6 most significant bits called l and m: l ranges in [0, 4) and m ranges in
	// [0, 64). l is the symbol tag.
	// Zero means a literal tag. All other values mean a copy tag.
	//
	// For literal tags:
	// - If m < 60, the next 1 + m bytes are literal bytes.
	// - Otherwise, let n be the little-endian unsigned integer denoted by the next
	// m - 59 bytes. The next 1 + n bytes after that are literal bytes.
	//
	// For copy tags, length bytes are copied from offset bytes ago, in the style of
	// Lempel-Ziv compression algorithms. In particular:
	// - For l == 1, the offset ranges in [0, 1<<11) and the length in [4, 12).
	// The length is 4 + the low 3 bits of m. The high 3 bits of m form bits 8-10
	// of the offset. The next byte is bits 0-7 of the offset.
	// - For l == 2, the offset ranges in [0, 1<<16) and the length in [1, 65).
	// The length is 1 + m. The offset is the little-endian unsigned integer
	// denoted by the next 2 bytes.
	// - For l == 3, as l == 2 but the offset is denoted by the next 4 bytes.
	//
    pub const TAG_LITERAL: u8 = 0x00;
    pub const TAG_COPY_1: u8 = 0x01;
    pub const TAG_COPY_2: u8 = 0x02;
    pub const TAG_COPY_4: u8 = 0x03;

    // Tag bytes below this value are literals with the length packed into m.
    pub const SHORT_LITERAL_LIMIT: u8 = 4 * 4;
    // m values from here on announce m - 59 extra length bytes.
    pub const LITERAL_EXTRA_LEN_BASE: u8 = 60;

    // Syntax limit of a single copy symbol
    pub const MAX_COPY_LENGTH: usize = 64;

    // Not supporting streams longer than this (not what snappy is intended for)
    pub const MAX_STREAM_SIZE: u64 = 0x7fff_ffff;

    // A u32 takes at most 5 bytes as a varint.
    pub const MAX_VARINT_LEN: usize = 5;

    // Default output bits per len3 mask window
    pub const LEN3_MASK_LIMIT: usize = 64;
}

// Symbol Model
mod symbol;
pub use self::symbol::{DecodeResult, DecodedSymbol, Symbol, process_symbols};

// Symbol Decoder
mod decode;
pub use self::decode::{Parsed, TagClass, decode_symbols, decode_symbols_from_start, parse_symbol, tag_len};

// Block Decompressor
mod decompress;
pub use self::decompress::{decompress, decompress_vec, decompressed_len};

// Len3 Mask Engine
mod len3;
pub use self::len3::{BitSequence, Len3Mask, len3_mask, len3_mask_64, to_bitsequence};
