//! `BitReader` API
//!
//! Reads a byte buffer one bit at a time, least-significant bit
//! first within each byte, through a one-byte lookahead buffer.

use crate::errors::DecodeErrorStatus;

pub struct BitReader<'src>
{
    // buffer we are pulling bits from
    src:       &'src [u8],
    // position of the next byte to load into the lookahead
    position:  usize,
    // one byte lookahead, already-consumed bits shifted out
    buffer:    u8,
    // bits still unconsumed in `buffer`
    bits_left: u8
}

impl<'src> BitReader<'src>
{
    pub fn new(in_buffer: &'src [u8]) -> BitReader<'src>
    {
        BitReader {
            src:       in_buffer,
            position:  0,
            buffer:    0,
            bits_left: 0
        }
    }

    /// Read a single bit, reloading the lookahead byte when the
    /// current one is exhausted.
    #[inline(always)]
    pub fn read_bit(&mut self) -> Result<u8, DecodeErrorStatus>
    {
        if self.bits_left == 0
        {
            self.buffer = *self
                .src
                .get(self.position)
                .ok_or(DecodeErrorStatus::TruncatedInput)?;

            self.position += 1;
            self.bits_left = 8;
        }

        let bit = self.buffer & 1;

        self.buffer >>= 1;
        self.bits_left -= 1;

        Ok(bit)
    }

    /// Read `count` bits, assembled least-significant-bit first.
    ///
    /// `count` never exceeds 16 in deflate (largest field is the
    /// 13 extra distance bits plus room to spare).
    #[inline(always)]
    pub fn read_bits(&mut self, count: u8) -> Result<u16, DecodeErrorStatus>
    {
        debug_assert!(count <= 16);

        let mut value = 0_u16;

        for i in 0..count
        {
            value |= u16::from(self.read_bit()?) << i;
        }

        Ok(value)
    }
}
