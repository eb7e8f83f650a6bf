//! A small DEFLATE decompressor.
//!
//! This is the bit-exact inverse of the subset of RFC 1951 that the
//! pixa decoders need: fixed and dynamic Huffman blocks, decoded one
//! bit at a time through an explicit prefix-code trie. Stored
//! (uncompressed) blocks are deliberately unsupported and reported as
//! [`InvalidBlockType`](errors::DecodeErrorStatus::InvalidBlockType).
//!
//! ```
//! use pixa_inflate::DeflateDecoder;
//!
//! // a fixed-Huffman stream holding two zero bytes
//! let data = [0x63, 0x60, 0x00, 0x00];
//! let bytes = DeflateDecoder::new(&data).decode().unwrap();
//!
//! assert_eq!(bytes, [0, 0]);
//! ```
pub use crate::decoder::DeflateDecoder;

mod bitstream;
mod constants;
mod decoder;
pub mod errors;
mod tree;
