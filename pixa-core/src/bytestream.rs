//! A positioned reader over an in-memory byte buffer.
//!
//! PNG is a big-endian format, so only big-endian fetches are
//! provided. Infallible variants return zero on overrun, `_err`
//! variants surface the overrun to the caller.

static ERROR_MSG: &str = "No more bytes";

/// An encapsulation of a byte stream.
///
/// Keeps the position of the last read, all reads advance
/// the position past the bytes they consumed.
pub struct ByteReader<'a>
{
    stream:   &'a [u8],
    position: usize
}

impl<'a> ByteReader<'a>
{
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a>
    {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }
    /// Skip `bytes` bytes ahead of the stream.
    pub fn skip(&mut self, bytes: usize)
    {
        self.position = self.position.saturating_add(bytes);
    }

    /// Return true if the stream can satisfy `bytes` more reads
    /// without overrunning the buffer.
    pub const fn has(&self, bytes: usize) -> bool
    {
        self.position.saturating_add(bytes) <= self.stream.len()
    }

    pub const fn remaining(&self) -> usize
    {
        self.stream.len().saturating_sub(self.position)
    }

    pub const fn len(&self) -> usize
    {
        self.stream.len()
    }

    pub const fn is_empty(&self) -> bool
    {
        self.stream.is_empty()
    }

    pub const fn get_position(&self) -> usize
    {
        self.position
    }

    /// Fetch `num` bytes from the stream, advancing the position
    /// past them.
    pub fn get(&mut self, num: usize) -> Result<&'a [u8], &'static str>
    {
        match self.stream.get(self.position..self.position + num)
        {
            Some(bytes) =>
            {
                self.position += num;
                Ok(bytes)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Look at `num` bytes starting `offset` bytes past the current
    /// position, without advancing the stream.
    pub fn peek_at(&self, offset: usize, num: usize) -> Result<&'a [u8], &'static str>
    {
        let start = self.position + offset;

        self.stream.get(start..start + num).ok_or(ERROR_MSG)
    }
}

macro_rules! get_single_type {
    ($name:tt,$name_err:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a>
        {
            /// Fetch the next value big-endian, returning zero
            /// if the stream is exhausted.
            #[inline(always)]
            pub fn $name(&mut self) -> $int_type
            {
                self.$name_err().unwrap_or(0)
            }

            /// Fetch the next value big-endian, erroring out
            /// if the stream is exhausted.
            #[inline(always)]
            pub fn $name_err(&mut self) -> Result<$int_type, &'static str>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL)
                {
                    Some(position) =>
                    {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        Ok($int_type::from_be_bytes(space))
                    }
                    None => Err(ERROR_MSG)
                }
            }
        }
    };
}

get_single_type!(get_u8, get_u8_err, u8);
get_single_type!(get_u16_be, get_u16_be_err, u16);
get_single_type!(get_u32_be, get_u32_be_err, u32);
get_single_type!(get_u64_be, get_u64_be_err, u64);

#[cfg(test)]
mod tests
{
    use super::ByteReader;

    #[test]
    fn fetches_are_big_endian()
    {
        let mut stream = ByteReader::new(&[0x01, 0x02, 0x03, 0x04]);

        assert_eq!(stream.get_u32_be(), 0x01020304);
        assert_eq!(stream.get_position(), 4);
    }

    #[test]
    fn overrun_is_reported()
    {
        let mut stream = ByteReader::new(&[0xFF]);

        assert_eq!(stream.get_u8_err(), Ok(0xFF));
        assert!(stream.get_u8_err().is_err());
        // the infallible variant falls back to zero
        assert_eq!(stream.get_u16_be(), 0);
    }

    #[test]
    fn peek_does_not_advance()
    {
        let stream = ByteReader::new(b"abcdef");

        assert_eq!(stream.peek_at(2, 3), Ok(&b"cde"[..]));
        assert_eq!(stream.get_position(), 0);
    }
}
