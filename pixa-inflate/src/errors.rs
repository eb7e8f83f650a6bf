use std::fmt::{Debug, Formatter};

/// A struct returned when decompression fails.
pub struct InflateDecodeErrors
{
    /// Reason why decompression failed.
    pub error: DecodeErrorStatus,
    /// Bytes decoded up until the failing stage.
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    /// Create a new error wrapper, `data` being the bytes decoded
    /// before the error was hit.
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }

    /// Create a new error wrapper with an empty data vector.
    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, vec![])
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum DecodeErrorStatus
{
    /// The compressed buffer ran out mid-read.
    TruncatedInput,
    /// A block header announced a type this decoder does not
    /// handle; stored blocks (type 0) also land here.
    InvalidBlockType(u8),
    /// The stream violated the prefix-code structure the block
    /// itself declared.
    MalformedBitstream(&'static str)
}

impl Debug for DecodeErrorStatus
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::TruncatedInput => writeln!(f, "Compressed stream ended mid-read"),
            Self::InvalidBlockType(block) =>
            {
                writeln!(f, "Unsupported deflate block type {block}")
            }
            Self::MalformedBitstream(reason) => writeln!(f, "Malformed bitstream: {reason}")
        }
    }
}
