//! Widening of reconstructed scanline bytes into per-channel samples.

/// Unpack one reconstructed scanline into `samples` channel values.
///
/// Depth 8 widens bytes, depth 16 joins big-endian pairs. Sub-byte
/// depths unpack most-significant group first, raw and unscaled, and
/// padding bits in the final byte are dropped by the `samples` cut.
pub(crate) fn bytes_to_values(raw: &[u8], depth: u8, samples: usize, out: &mut Vec<u16>)
{
    out.clear();

    match depth
    {
        8 => out.extend(raw.iter().map(|x| u16::from(*x))),
        16 => out.extend(
            raw.chunks_exact(2)
                .map(|x| u16::from_be_bytes([x[0], x[1]]))
        ),
        1 | 2 | 4 =>
        {
            let mask = (1_u16 << depth) - 1;

            for byte in raw
            {
                for group in (0..8 / depth).rev()
                {
                    out.push((u16::from(*byte) >> (group * depth)) & mask);
                }
            }
        }
        // IHDR validation only lets the five PNG depths through
        _ => unreachable!("Invalid bit depth {depth}")
    }
    out.truncate(samples);
}
