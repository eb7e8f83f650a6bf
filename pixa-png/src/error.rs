use std::fmt::{Debug, Formatter};

use pixa_inflate::errors::InflateDecodeErrors;

pub enum PngDecodeErrors
{
    /// The stream ended where more structure was required.
    UnexpectedEof,
    /// The first eight bytes are not the PNG magic sequence.
    InvalidSignature,
    /// A chunk tag contained a non-alphabetic byte.
    InvalidChunkType([u8; 4]),
    /// A chunk declared a length of 2^31 or more.
    ChunkTooLarge([u8; 4], usize),
    /// A chunk that depends on another appeared without it.
    MissingRequiredChunk(&'static str),
    /// A chunk payload did not have the length its type demands.
    InvalidChunkLength(&'static str, usize),
    /// The decompressed pixel stream did not slice into whole
    /// scanlines, `(expected, found)` byte counts.
    TruncatedImageData(usize, usize),
    /// A scanline carried a filter byte outside 0..=4.
    InvalidFilterType(u8),
    /// An `sBIT` chunk exceeded the stored depth or carried a zero
    /// entry, `(significant bits, stored depth)`.
    InvalidSignificantBits(u8, u8),
    GenericStatic(&'static str),
    Generic(String),
    InflateErrors(InflateDecodeErrors)
}

impl Debug for PngDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::UnexpectedEof => writeln!(f, "Unexpected end of PNG stream"),
            Self::InvalidSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::InvalidChunkType(tag) =>
            {
                writeln!(f, "Chunk {tag:?} has an invalid chunk type")
            }
            Self::ChunkTooLarge(tag, length) =>
            {
                writeln!(f, "Chunk {tag:?} is too large: {length}")
            }
            Self::MissingRequiredChunk(chunk) =>
            {
                writeln!(f, "Required chunk {chunk} is missing")
            }
            Self::InvalidChunkLength(chunk, length) =>
            {
                writeln!(f, "{chunk} chunk has incorrect length {length}")
            }
            Self::TruncatedImageData(expected, found) => writeln!(
                f,
                "Wrong size for decompressed image data, expected {expected} bytes but found {found}"
            ),
            Self::InvalidFilterType(filter) => writeln!(f, "Invalid PNG filter type {filter}"),
            Self::InvalidSignificantBits(sbit, depth) => writeln!(
                f,
                "sBIT value {sbit} not representable in stored bit depth {depth}"
            ),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::InflateErrors(err) => writeln!(f, "Error decoding idat chunks: {err:?}")
        }
    }
}

impl From<&'static str> for PngDecodeErrors
{
    fn from(val: &'static str) -> Self
    {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngDecodeErrors
{
    fn from(val: String) -> Self
    {
        Self::Generic(val)
    }
}

impl From<InflateDecodeErrors> for PngDecodeErrors
{
    fn from(val: InflateDecodeErrors) -> Self
    {
        Self::InflateErrors(val)
    }
}
