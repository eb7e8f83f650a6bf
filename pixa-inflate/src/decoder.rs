use crate::bitstream::BitReader;
use crate::constants::{
    DEFLATE_DISTANCE_BASE, DEFLATE_DISTANCE_EXTRA_BITS, DEFLATE_END_OF_BLOCK,
    DEFLATE_LENGTH_BASE, DEFLATE_LENGTH_EXTRA_BITS, DEFLATE_NUM_LITLEN_SYMS,
    DEFLATE_NUM_OFFSET_SYMS, DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION
};
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};
use crate::tree::PrefixTree;

/// Block type 1, literal/length code hard-wired by the RFC.
const DEFLATE_BLOCKTYPE_STATIC: u16 = 1;
/// Block type 2, code lengths carried in the block header.
const DEFLATE_BLOCKTYPE_DYNAMIC: u16 = 2;

/// A DEFLATE decompressor over an in-memory buffer.
///
/// One instance decodes one stream; the output buffer is owned by
/// the decode call and handed back on success.
pub struct DeflateDecoder<'a>
{
    data:          &'a [u8],
    stream:        BitReader<'a>,
    out:           Vec<u8>,
    is_last_block: bool
}

impl<'a> DeflateDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a>
    {
        DeflateDecoder {
            data,
            stream: BitReader::new(data),
            out: Vec::new(),
            is_last_block: false
        }
    }

    /// Decode a zlib-wrapped deflate stream.
    ///
    /// The two zlib header bytes are skipped, not validated, and the
    /// trailing adler32 is ignored, so a stream with a damaged wrapper
    /// but intact deflate payload still decodes.
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        if self.data.len() < 2
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::TruncatedInput
            ));
        }

        self.stream = BitReader::new(&self.data[2..]);

        self.decode()
    }

    /// Decode a raw deflate stream, processing blocks until one
    /// carries the final-block flag.
    pub fn decode(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        loop
        {
            match self.decode_block()
            {
                Ok(()) =>
                {}
                Err(e) =>
                {
                    return Err(InflateDecodeErrors::new(e, core::mem::take(&mut self.out)))
                }
            }

            if self.is_last_block
            {
                return Ok(core::mem::take(&mut self.out));
            }
        }
    }

    /// Decode a single block: the 3-bit header, the code trees and
    /// the symbol stream up to the end-of-block marker.
    fn decode_block(&mut self) -> Result<(), DecodeErrorStatus>
    {
        self.is_last_block = self.stream.read_bit()? == 1;

        let block_type = self.stream.read_bits(2)?;

        let (litlen_tree, dist_tree) = match block_type
        {
            DEFLATE_BLOCKTYPE_STATIC => Self::static_trees()?,
            DEFLATE_BLOCKTYPE_DYNAMIC => self.decode_trees()?,
            // type 0 (stored) is deliberately unsupported, type 3 is
            // reserved by the RFC
            _ => return Err(DecodeErrorStatus::InvalidBlockType(block_type as u8))
        };

        self.decode_block_data(&litlen_tree, &dist_tree)
    }

    /// The hard-coded trees of a static Huffman block.
    fn static_trees() -> Result<(PrefixTree, PrefixTree), DecodeErrorStatus>
    {
        let mut lens = [0_u8; DEFLATE_NUM_LITLEN_SYMS];

        lens[000..144].fill(8);
        lens[144..256].fill(9);
        lens[256..280].fill(7);
        lens[280..288].fill(8);

        let litlen_tree = PrefixTree::from_lengths(&lens)?;
        let dist_tree = PrefixTree::from_lengths(&[5_u8; 30])?;

        Ok((litlen_tree, dist_tree))
    }

    /// Decode the literal/length and distance trees of a dynamic
    /// Huffman block.
    fn decode_trees(&mut self) -> Result<(PrefixTree, PrefixTree), DecodeErrorStatus>
    {
        let num_litlen_syms = 257 + usize::from(self.stream.read_bits(5)?);
        let num_offset_syms = 1 + usize::from(self.stream.read_bits(5)?);
        let num_explicit_precode_lens = 4 + usize::from(self.stream.read_bits(4)?);

        // the pre-code: 3-bit lengths, stored in a fixed permuted order
        let mut precode_lens = [0_u8; DEFLATE_NUM_PRECODE_SYMS];

        for i in DEFLATE_PRECODE_LENS_PERMUTATION
            .iter()
            .take(num_explicit_precode_lens)
        {
            precode_lens[usize::from(*i)] = self.stream.read_bits(3)? as u8;
        }

        let precode_tree = PrefixTree::from_lengths(&precode_lens)?;

        // the pre-code then spells out the real code lengths,
        // run-length escapes included
        let expected = num_litlen_syms + num_offset_syms;
        let mut lens = Vec::with_capacity(DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS);

        while lens.len() < expected
        {
            let symbol = precode_tree.decode_symbol(&mut self.stream)?;

            match symbol
            {
                0..=15 => lens.push(symbol as u8),
                16 =>
                {
                    // repeat the previous length 3..=6 times
                    let prev = *lens.last().ok_or(DecodeErrorStatus::MalformedBitstream(
                        "length repeat with no previous length"
                    ))?;
                    let repeat = 3 + self.stream.read_bits(2)?;

                    lens.extend(core::iter::repeat(prev).take(usize::from(repeat)));
                }
                17 =>
                {
                    // 3..=10 zero lengths
                    let repeat = 3 + self.stream.read_bits(3)?;

                    lens.extend(core::iter::repeat(0).take(usize::from(repeat)));
                }
                18 =>
                {
                    // 11..=138 zero lengths
                    let repeat = 11 + self.stream.read_bits(7)?;

                    lens.extend(core::iter::repeat(0).take(usize::from(repeat)));
                }
                _ =>
                {
                    return Err(DecodeErrorStatus::MalformedBitstream(
                        "invalid code length symbol"
                    ))
                }
            }
        }
        // a final repeat may overrun the declared count
        lens.truncate(expected);

        let litlen_tree = PrefixTree::from_lengths(&lens[..num_litlen_syms])?;
        let dist_tree = PrefixTree::from_lengths(&lens[num_litlen_syms..])?;

        Ok((litlen_tree, dist_tree))
    }

    /// Decode the symbol stream of one block into the output buffer.
    fn decode_block_data(
        &mut self, litlen_tree: &PrefixTree, dist_tree: &PrefixTree
    ) -> Result<(), DecodeErrorStatus>
    {
        loop
        {
            let symbol = litlen_tree.decode_symbol(&mut self.stream)?;

            if symbol < DEFLATE_END_OF_BLOCK
            {
                self.out.push(symbol as u8);
                continue;
            }
            if symbol == DEFLATE_END_OF_BLOCK
            {
                return Ok(());
            }

            let length_class = usize::from(symbol - 257);

            if length_class >= DEFLATE_LENGTH_BASE.len()
            {
                return Err(DecodeErrorStatus::MalformedBitstream(
                    "invalid length symbol"
                ));
            }

            let extra = self.stream.read_bits(DEFLATE_LENGTH_EXTRA_BITS[length_class])?;
            let length = usize::from(DEFLATE_LENGTH_BASE[length_class] + extra);

            let dist_symbol = usize::from(dist_tree.decode_symbol(&mut self.stream)?);

            if dist_symbol >= DEFLATE_DISTANCE_BASE.len()
            {
                return Err(DecodeErrorStatus::MalformedBitstream(
                    "invalid distance symbol"
                ));
            }

            let extra = self.stream.read_bits(DEFLATE_DISTANCE_EXTRA_BITS[dist_symbol])?;
            let distance = usize::from(DEFLATE_DISTANCE_BASE[dist_symbol]) + usize::from(extra);

            if distance > self.out.len()
            {
                return Err(DecodeErrorStatus::MalformedBitstream(
                    "distance exceeds bytes produced"
                ));
            }

            // byte-by-byte so the copy may read bytes this same match
            // just appended, which is what expands repeated patterns
            // when length > distance
            for _ in 0..length
            {
                let byte = self.out[self.out.len() - distance];

                self.out.push(byte);
            }
        }
    }
}
