//! Shared decoder configuration.
//!
//! One `DecoderOptions` instance can be reused across decoders;
//! each decoder only looks at the options that concern it.

/// Decoder options shared by the pixa decoders.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions
{
    /// Maximum width a decoder will accept before
    /// refusing to decode.
    max_width:   usize,
    /// Maximum height a decoder will accept before
    /// refusing to decode.
    max_height:  usize,
    /// In strict mode decoders reject recoverable oddities
    /// (trailing data, out-of-range metadata) instead of
    /// warning and carrying on.
    strict_mode: bool
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        Self {
            max_width:   1 << 17,
            max_height:  1 << 17,
            strict_mode: false
        }
    }
}

impl DecoderOptions
{
    pub const fn get_max_width(&self) -> usize
    {
        self.max_width
    }

    pub const fn get_max_height(&self) -> usize
    {
        self.max_height
    }

    pub const fn get_strict_mode(&self) -> bool
    {
        self.strict_mode
    }

    pub fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }

    pub fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }

    pub fn set_strict_mode(mut self, strict: bool) -> Self
    {
        self.strict_mode = strict;
        self
    }
}
