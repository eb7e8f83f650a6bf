//! The lazy scanline stream.
//!
//! Filter reversal, sample unpacking, palette expansion and `sBIT`
//! narrowing all happen here, one row per `next` call. Rows are never
//! cached, each one is reconstructed from the previous row kept as
//! filter context.

use crate::decoder::PLTEEntry;
use crate::enums::FilterMethod;
use crate::error::PngDecodeErrors;
use crate::filters;
use crate::utils::bytes_to_values;

/// How stored samples become output samples.
pub(crate) enum Materialize
{
    /// Output rows are the stored samples.
    Direct,
    /// Stored samples are palette indices, expanded to RGB or RGBA.
    Palette
    {
        entries:    Vec<PLTEEntry>,
        with_alpha: bool
    }
}

/// Iterator over the decoded rows of an image, top to bottom.
///
/// Yields `width * planes` samples per row. A bad filter byte ends
/// the stream; the error is yielded once and the iterator fuses.
pub struct Rows
{
    data:        Vec<u8>,
    row_bytes:   usize,
    samples:     usize,
    height:      usize,
    depth:       u8,
    filter_unit: usize,
    materialize: Materialize,
    shift:       u8,

    row:     usize,
    prev:    Vec<u8>,
    current: Vec<u8>,
    stored:  Vec<u16>,
    fused:   bool
}

impl Rows
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        data: Vec<u8>, row_bytes: usize, samples: usize, height: usize, depth: u8,
        filter_unit: usize, materialize: Materialize, shift: u8
    ) -> Rows
    {
        Rows {
            data,
            row_bytes,
            samples,
            height,
            depth,
            filter_unit,
            materialize,
            shift,
            row: 0,
            // the first row filters against an all-zero previous row
            prev: vec![0; row_bytes],
            current: vec![0; row_bytes],
            stored: Vec::with_capacity(samples),
            fused: false
        }
    }
}

impl Iterator for Rows
{
    type Item = Result<Vec<u16>, PngDecodeErrors>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.fused || self.row == self.height
        {
            return None;
        }

        let offset = self.row * (self.row_bytes + 1);
        let filter_byte = self.data[offset];
        let raw = &self.data[offset + 1..offset + 1 + self.row_bytes];

        let filter = match FilterMethod::from_int(filter_byte)
        {
            Some(filter) => filter,
            None =>
            {
                self.fused = true;
                return Some(Err(PngDecodeErrors::InvalidFilterType(filter_byte)));
            }
        };

        match filter
        {
            FilterMethod::None => self.current.copy_from_slice(raw),
            FilterMethod::Sub => filters::undo_sub(raw, &mut self.current, self.filter_unit),
            FilterMethod::Up => filters::undo_up(&self.prev, raw, &mut self.current),
            FilterMethod::Average =>
            {
                filters::undo_average(&self.prev, raw, &mut self.current, self.filter_unit)
            }
            FilterMethod::Paeth =>
            {
                filters::undo_paeth(&self.prev, raw, &mut self.current, self.filter_unit)
            }
        }
        core::mem::swap(&mut self.prev, &mut self.current);
        self.row += 1;

        bytes_to_values(&self.prev, self.depth, self.samples, &mut self.stored);

        let mut out = match &self.materialize
        {
            Materialize::Direct => self.stored.clone(),
            Materialize::Palette {
                entries,
                with_alpha
            } =>
            {
                let planes = 3 + usize::from(*with_alpha);
                let mut expanded = Vec::with_capacity(self.stored.len() * planes);

                for index in &self.stored
                {
                    // entries is always 256 long, mask instead of bounds-check
                    let entry = entries[usize::from(*index) & 255];

                    expanded.push(u16::from(entry.red));
                    expanded.push(u16::from(entry.green));
                    expanded.push(u16::from(entry.blue));
                    if *with_alpha
                    {
                        expanded.push(u16::from(entry.alpha));
                    }
                }
                expanded
            }
        };

        if self.shift > 0
        {
            for value in &mut out
            {
                *value >>= self.shift;
            }
        }

        Some(Ok(out))
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        let left = if self.fused { 0 } else { self.height - self.row };

        (left, Some(left))
    }
}
