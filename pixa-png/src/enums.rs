#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

/// Chunk types this decoder acts on, see
/// https://www.w3.org/TR/2003/REC-PNG-20031110/ table 5.3.
///
/// Anything else maps to `unkn` and is skipped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType
{
    IHDR,
    PLTE,
    IDAT,
    IEND,
    tRNS,
    bKGD,
    gAMA,
    sBIT,
    pHYs,
    unkn
}

impl PngChunkType
{
    pub const fn from_tag(tag: &[u8; 4]) -> PngChunkType
    {
        match tag
        {
            b"IHDR" => Self::IHDR,
            b"PLTE" => Self::PLTE,
            b"IDAT" => Self::IDAT,
            b"IEND" => Self::IEND,
            b"tRNS" => Self::tRNS,
            b"bKGD" => Self::bKGD,
            b"gAMA" => Self::gAMA,
            b"sBIT" => Self::sBIT,
            b"pHYs" => Self::pHYs,
            _ => Self::unkn
        }
    }
}

/// The per-scanline filters of the PNG format.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMethod
{
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod
{
    pub const fn from_int(int: u8) -> Option<FilterMethod>
    {
        match int
        {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }
}

/// Color layout of the encoded image, decomposed from the 3-bit
/// color-type flag set in `IHDR` (1 = palette, 2 = color, 4 = alpha).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngColor
{
    Luma,
    LumaA,
    Palette,
    RGB,
    RGBA,
    Unknown
}

impl Default for PngColor
{
    fn default() -> Self
    {
        Self::Unknown
    }
}

impl PngColor
{
    pub(crate) const fn from_int(int: u8) -> Option<PngColor>
    {
        match int
        {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    /// Samples per pixel as stored in the encoded stream (palette
    /// indices count as one sample).
    pub(crate) const fn num_planes(self) -> u8
    {
        match self
        {
            PngColor::Luma | PngColor::Palette => 1,
            PngColor::LumaA => 2,
            PngColor::RGB => 3,
            PngColor::RGBA => 4,
            PngColor::Unknown => 0
        }
    }

    pub(crate) const fn is_greyscale(self) -> bool
    {
        matches!(self, PngColor::Luma | PngColor::LumaA)
    }

    pub(crate) const fn has_alpha(self) -> bool
    {
        matches!(self, PngColor::LumaA | PngColor::RGBA)
    }

    pub(crate) const fn is_palette(self) -> bool
    {
        matches!(self, PngColor::Palette)
    }
}
