/// Colorspace of decoded samples.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace
{
    Luma,
    LumaA,
    RGB,
    RGBA,
    Unknown
}

impl ColorSpace
{
    pub const fn num_components(self) -> usize
    {
        match self
        {
            Self::Luma => 1,
            Self::LumaA => 2,
            Self::RGB => 3,
            Self::RGBA => 4,
            Self::Unknown => 0
        }
    }

    pub const fn has_alpha(self) -> bool
    {
        matches!(self, Self::LumaA | Self::RGBA)
    }
}
