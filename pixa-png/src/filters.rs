//! Reversal of the per-scanline PNG prediction filters.
//!
//! Every function takes the raw (still filtered) scanline bytes and
//! reconstructs into `current`. Filters reference three neighbours:
//!
//! ```text
//! ┌─────┬─────┐
//! │ c   │  b  │
//! ├─────┼─────┤
//! │ a   │ x   │
//! └─────┴─────┘
//! ```
//!
//! where `a` and `c` sit one `filter_unit` (one whole pixel, at
//! least one byte) to the left. Callers pass an all-zero `prev` row
//! for the first scanline, which collapses the `b`/`c` terms.

pub(crate) fn undo_sub(raw: &[u8], current: &mut [u8], filter_unit: usize)
{
    let len = current.len().min(raw.len());

    // leftmost pixel has no `a`
    current[..filter_unit.min(len)].copy_from_slice(&raw[..filter_unit.min(len)]);

    for i in filter_unit..len
    {
        let a = current[i - filter_unit];

        current[i] = raw[i].wrapping_add(a);
    }
}

pub(crate) fn undo_up(prev: &[u8], raw: &[u8], current: &mut [u8])
{
    let len = current.len().min(raw.len()).min(prev.len());

    for i in 0..len
    {
        current[i] = raw[i].wrapping_add(prev[i]);
    }
}

pub(crate) fn undo_average(prev: &[u8], raw: &[u8], current: &mut [u8], filter_unit: usize)
{
    let len = current.len().min(raw.len()).min(prev.len());

    for i in 0..filter_unit.min(len)
    {
        // a is zero, the predictor degenerates to b / 2
        current[i] = raw[i].wrapping_add(prev[i] >> 1);
    }

    for i in filter_unit..len
    {
        let a = u16::from(current[i - filter_unit]);
        let b = u16::from(prev[i]);

        current[i] = raw[i].wrapping_add(((a + b) >> 1) as u8);
    }
}

pub(crate) fn undo_paeth(prev: &[u8], raw: &[u8], current: &mut [u8], filter_unit: usize)
{
    let len = current.len().min(raw.len()).min(prev.len());

    for i in 0..filter_unit.min(len)
    {
        // a = c = 0, the predictor always resolves to b
        current[i] = raw[i].wrapping_add(prev[i]);
    }

    for i in filter_unit..len
    {
        let a = i32::from(current[i - filter_unit]);
        let b = i32::from(prev[i]);
        let c = i32::from(prev[i - filter_unit]);

        current[i] = raw[i].wrapping_add(paeth_predictor(a, b, c));
    }
}

/// The Paeth predictor: whichever of a, b, c is closest to
/// `a + b - c`, ties broken in the order a, b, c.
fn paeth_predictor(a: i32, b: i32, c: i32) -> u8
{
    let p = a + b - c;

    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc
    {
        a as u8
    }
    else if pb <= pc
    {
        b as u8
    }
    else
    {
        c as u8
    }
}
