/// The sample precision of a decoded image.
///
/// Decoded samples are always carried in a `u16`, which comfortably
/// holds every depth PNG can store, including the packed 1, 2 and
/// 4 bit greyscale/palette depths.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BitDepth
{
    One,
    Two,
    Four,
    Eight,
    Sixteen
}

impl Default for BitDepth
{
    fn default() -> Self
    {
        Self::Eight
    }
}

impl BitDepth
{
    pub const fn from_int(int: u8) -> Option<BitDepth>
    {
        match int
        {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            16 => Some(Self::Sixteen),
            _ => None
        }
    }

    /// Number of bits one sample occupies in the encoded stream.
    pub const fn bit_size(self) -> u8
    {
        match self
        {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16
        }
    }

    /// The largest value a sample of this depth can take.
    ///
    /// Larger values should be clamped to this during depth
    /// conversions.
    pub const fn max_value(self) -> u16
    {
        match self
        {
            Self::Sixteen => u16::MAX,
            depth => (1 << depth.bit_size()) - 1
        }
    }
}
