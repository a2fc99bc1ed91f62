extern crate snappy_symbols;
extern crate snap;
extern crate quickcheck;

use quickcheck::QuickCheck;
use snappy_symbols::{decode_symbols, decompress, decompress_vec, decompressed_len, process_symbols};


fn press(data: &[u8]) -> Vec<u8> {
	snap::raw::Encoder::new().compress_vec(data).unwrap()
}

fn roundtrip(data: &[u8]) {

	// Compress into a raw block
	let comp = press(data);

	// Read into Buffer
	let mut decomp: Vec<u8> = vec![0; data.len()];
	let n = decompress(&mut decomp, &comp).unwrap();

	// Check Result
	assert_eq!(n, data.len());
	assert!(decomp == data);
	assert_eq!(decompress_vec(&comp).unwrap(), data);
}


#[test]
/// Snappy: Roundtrip Uncompressible Data
fn should_do_uncompressible() {
	roundtrip(b"123456789abcdefg");
	roundtrip(b"The quick red fox jumped over the lazy dog");
}

#[test]
/// Snappy: Roundtrip Compressible Data
fn should_do_compressible() {
	roundtrip(b"1111111100000000");
	roundtrip("The quick red fox jumped over the lazy dog. ".repeat(40).as_bytes());
	roundtrip(&vec![0xa5; 70_000]);
}

#[test]
/// Snappy: Test Empty
fn should_do_empty() {
	let a = [];
	roundtrip(&a);
	assert_eq!(decompress_vec(&[0x00]).unwrap(), Vec::<u8>::new());
}

#[test]
/// Snappy: Symbol lengths add up to the header length
fn should_cover_header_len() {
	let data = "abcdefgh".repeat(100);
	let comp = press(data.as_bytes());
	let (d_len, header_len) = decompressed_len(&comp).unwrap();
	assert_eq!(d_len, data.len());

	let symbols = decode_symbols(&comp, d_len, header_len).unwrap();
	let total: usize = symbols.iter().map(|s| s.symbol.len()).sum();
	assert_eq!(total, d_len);
	assert!(symbols.is_complete());
	assert_eq!(symbols.end_cursor(), Some(comp.len()));
	assert!(symbols.iter().any(|s| s.symbol.is_copy()));

	assert_eq!(process_symbols(&comp, &symbols).unwrap(), data.as_bytes());
}

#[test]
/// Snappy: Reads varint headers
fn should_read_header() {
	assert_eq!(decompressed_len(&[0x00]).unwrap(), (0, 1));
	assert_eq!(decompressed_len(&[0x7f, 0xff]).unwrap(), (127, 1));
	assert_eq!(decompressed_len(&[0x80, 0x01]).unwrap(), (128, 2));
	assert_eq!(decompressed_len(&[0xff, 0xff, 0xff, 0xff, 0x07]).unwrap(), (0x7fff_ffff, 5));

	// Too large, unterminated, and empty headers
	assert!(decompressed_len(&[0x80, 0x80, 0x80, 0x80, 0x08]).is_err());
	assert!(decompressed_len(&[0xff; 6]).is_err());
	assert!(decompressed_len(&[0x80]).is_err());
	assert!(decompressed_len(&[]).is_err());
}

#[test]
/// Snappy: Rejects Corrupt Blocks
fn should_reject_corrupt() {
	// Header promises 3 bytes, the literal only holds 2
	assert!(decompress_vec(&[0x03, 0x04, 0xaa, 0xbb]).is_err());
	// Trailing garbage after the last symbol
	assert!(decompress_vec(&[0x02, 0x04, 0xaa, 0xbb, 0x00]).is_err());
	// Copy reaching before the start of the output
	assert!(decompress_vec(&[0x05, 0x00, 0x61, 0x01, 0x02]).is_err());
	// Copy with offset 0
	assert!(decompress_vec(&[0x05, 0x00, 0x61, 0x01, 0x00]).is_err());
}

#[test]
/// Snappy: Destination Too Short
fn should_reject_short_dst() {
	let comp = press(b"The quick red fox jumped over the lazy dog");
	let mut dst = vec![0; 10];
	assert!(decompress(&mut dst, &comp).is_err());
}

#[test]
/// Snappy: Roundtrip Arbitrary Data
fn qc_roundtrip() {
	fn p(bytes: Vec<u8>) -> bool {
		decompress_vec(&press(&bytes)).unwrap() == bytes
	}
	QuickCheck::new()
		.tests(1000)
		.quickcheck(p as fn(Vec<u8>) -> bool);
}
