use log::warn;
use pixa_core::bit_depth::BitDepth;
use pixa_core::bytestream::ByteReader;
use pixa_core::colorspace::ColorSpace;
use pixa_core::options::DecoderOptions;

use crate::constants::PNG_SIGNATURE;
use crate::enums::{PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::rows::{Materialize, Rows};

/// One entry of the `PLTE` chunk, alpha filled in by `tRNS` and
/// defaulting to opaque.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PLTEEntry
{
    pub red:   u8,
    pub green: u8,
    pub blue:  u8,
    pub alpha: u8
}

impl Default for PLTEEntry
{
    fn default() -> Self
    {
        PLTEEntry {
            red:   0,
            green: 0,
            blue:  0,
            alpha: 255
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct PngChunk
{
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub tag:        [u8; 4]
}

/// Background color declared by a `bKGD` chunk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Background
{
    /// Palette index, for palette-indexed images.
    Palette(u8),
    /// One sample, for greyscale images.
    Luma(u16),
    /// One sample per color channel.
    Rgb([u16; 3])
}

/// Physical pixel density declared by a `pHYs` chunk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PixelDensity
{
    pub pixels_per_unit_x: u32,
    pub pixels_per_unit_y: u32,
    pub unit_is_meter:     bool
}

/// The image descriptor.
///
/// Built incrementally while chunks are parsed and frozen once the
/// pixel stream begins; the copy handed out on [`PngDecoder::decode`]
/// describes the *materialized* rows, so palette expansion and `sBIT`
/// narrowing are already folded into `depth`, `planes` and `alpha`.
#[derive(Debug, Clone, Default)]
pub struct PngInfo
{
    pub width:  usize,
    pub height: usize,
    /// Bit depth of the samples handed out, 1-16.
    pub depth:  u8,
    /// Samples per pixel in the rows handed out, 1-4.
    pub planes: u8,

    pub greyscale: bool,
    pub alpha:     bool,
    /// Interlacing is never applied; the stored interlace flag is
    /// ignored and this always reads false.
    pub interlace: bool,

    pub gamma:         Option<f32>,
    /// Transparent color key of a direct-color image. Greyscale uses
    /// only the first entry.
    pub transparent:   Option<[u16; 3]>,
    pub background:    Option<Background>,
    pub pixel_density: Option<PixelDensity>,
    /// RGB triples of the `PLTE` chunk, in file order.
    pub palette:       Vec<[u8; 3]>
}

/// A decoded image: the final descriptor plus the single-pass row
/// stream.
pub struct PngImage
{
    pub width:  usize,
    pub height: usize,
    pub info:   PngInfo,
    rows:       Rows
}

impl PngImage
{
    /// The row stream. Rows come out top to bottom, each one a
    /// `width * planes` vector of samples; the stream is consumed
    /// exactly once.
    pub fn rows(&mut self) -> &mut Rows
    {
        &mut self.rows
    }

    pub fn into_rows(self) -> Rows
    {
        self.rows
    }

    pub fn colorspace(&self) -> ColorSpace
    {
        match (self.info.greyscale, self.info.alpha)
        {
            (true, false) => ColorSpace::Luma,
            (true, true) => ColorSpace::LumaA,
            (false, false) => ColorSpace::RGB,
            (false, true) => ColorSpace::RGBA
        }
    }

    /// Sample precision of the rows handed out.
    ///
    /// `None` when `sBIT` narrowed samples to a precision PNG has no
    /// native depth for (e.g. 5 bits); `info.depth` always has the
    /// exact value.
    pub fn depth(&self) -> Option<BitDepth>
    {
        BitDepth::from_int(self.info.depth)
    }
}

/// A PNG container decoder over a complete in-memory file.
pub struct PngDecoder<'a>
{
    pub(crate) stream:      ByteReader<'a>,
    pub(crate) options:     DecoderOptions,
    pub(crate) png_info:    PngInfo,
    pub(crate) color:       PngColor,
    pub(crate) palette:     Vec<PLTEEntry>,
    pub(crate) palette_len: usize,
    pub(crate) sbit:        Vec<u8>,
    pub(crate) idat_chunks: Vec<u8>,
    pub(crate) row_bytes:   usize,
    pub(crate) seen_hdr:    bool,
    pub(crate) seen_plte:   bool,
    pub(crate) seen_trns:   bool,
    pub(crate) seen_idat:   bool
}

impl<'a> PngDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> PngDecoder<'a>
    {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a>
    {
        PngDecoder {
            stream: ByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            color: PngColor::Unknown,
            palette: Vec::new(),
            palette_len: 0,
            sbit: Vec::new(),
            idat_chunks: Vec::new(),
            row_bytes: 0,
            seen_hdr: false,
            seen_plte: false,
            seen_trns: false,
            seen_idat: false
        }
    }

    fn read_signature(&mut self) -> Result<(), PngDecodeErrors>
    {
        if self.stream.is_empty()
        {
            return Err(PngDecodeErrors::UnexpectedEof);
        }

        let signature = self
            .stream
            .get_u64_be_err()
            .map_err(|_| PngDecodeErrors::InvalidSignature)?;

        if signature != PNG_SIGNATURE
        {
            return Err(PngDecodeErrors::InvalidSignature);
        }

        Ok(())
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors>
    {
        // format is length - chunk type - [data] - crc
        let chunk_length = self
            .stream
            .get_u32_be_err()
            .map_err(|_| PngDecodeErrors::UnexpectedEof)? as usize;

        let mut tag = [0_u8; 4];

        tag.copy_from_slice(
            self.stream
                .get(4)
                .map_err(|_| PngDecodeErrors::UnexpectedEof)?
        );

        if chunk_length >= (1 << 31)
        {
            return Err(PngDecodeErrors::ChunkTooLarge(tag, chunk_length));
        }

        if !tag.iter().all(|x| x.is_ascii_alphabetic())
        {
            return Err(PngDecodeErrors::InvalidChunkType(tag));
        }

        if !self.stream.has(chunk_length + 4 /* crc bytes */)
        {
            return Err(PngDecodeErrors::UnexpectedEof);
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk_type: PngChunkType::from_tag(&tag),
            tag
        })
    }

    /// Decode the whole container, returning the row stream and the
    /// final image descriptor.
    pub fn decode(mut self) -> Result<PngImage, PngDecodeErrors>
    {
        self.read_signature()?;

        if self.stream.peek_at(4, 4) != Ok(&b"IHDR"[..])
        {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk not IHDR, corrupt PNG"
            ));
        }

        loop
        {
            let chunk = self.read_chunk_header()?;

            match chunk.chunk_type
            {
                PngChunkType::IHDR => self.parse_ihdr(chunk)?,
                PngChunkType::PLTE => self.parse_plte(chunk)?,
                PngChunkType::IDAT => self.parse_idat(chunk)?,
                PngChunkType::tRNS => self.parse_trns(chunk)?,
                PngChunkType::bKGD => self.parse_bkgd(chunk)?,
                PngChunkType::gAMA => self.parse_gama(chunk)?,
                PngChunkType::sBIT => self.parse_sbit(chunk)?,
                PngChunkType::pHYs => self.parse_phys(chunk)?,
                PngChunkType::IEND => break,
                PngChunkType::unkn => self.skip_unknown(chunk)
            }
        }

        if !self.seen_hdr
        {
            return Err(PngDecodeErrors::MissingRequiredChunk("IHDR"));
        }
        if !self.seen_idat
        {
            return Err(PngDecodeErrors::MissingRequiredChunk("IDAT"));
        }

        let data = self.inflate()?;
        // done with the compressed stream
        self.idat_chunks = Vec::new();

        let scanline_len = self.row_bytes + 1;
        let expected = scanline_len * self.png_info.height;

        if data.len() < expected
        {
            return Err(PngDecodeErrors::TruncatedImageData(expected, data.len()));
        }
        if data.len() > expected
        {
            if self.options.get_strict_mode()
            {
                return Err(PngDecodeErrors::Generic(format!(
                    "Extra {} bytes after the last scanline",
                    data.len() - expected
                )));
            }
            warn!(
                "Ignoring {} trailing bytes after the last scanline",
                data.len() - expected
            );
        }

        self.finish(data)
    }

    /// Fold palette expansion and `sBIT` narrowing into the
    /// descriptor and build the row stream.
    fn finish(mut self, data: Vec<u8>) -> Result<PngImage, PngDecodeErrors>
    {
        let mut info = self.png_info.clone();

        if self.seen_plte
        {
            info.palette = self.palette[..self.palette_len]
                .iter()
                .map(|e| [e.red, e.green, e.blue])
                .collect();
        }

        let materialize = if self.color.is_palette()
        {
            info.greyscale = false;
            info.alpha = self.seen_trns;
            info.planes = 3 + u8::from(self.seen_trns);
            info.depth = 8;

            Materialize::Palette {
                entries:    core::mem::take(&mut self.palette),
                with_alpha: self.seen_trns
            }
        }
        else
        {
            Materialize::Direct
        };

        let shift = if self.sbit.is_empty()
        {
            0
        }
        else
        {
            let max_bits = *self.sbit.iter().max().unwrap();
            let min_bits = *self.sbit.iter().min().unwrap();

            if min_bits == 0 || max_bits > info.depth
            {
                return Err(PngDecodeErrors::InvalidSignificantBits(
                    if min_bits == 0 { 0 } else { max_bits },
                    info.depth
                ));
            }

            info.depth - max_bits
        };

        info.depth -= shift;

        let rows = Rows::new(
            data,
            self.row_bytes,
            self.png_info.width * usize::from(self.png_info.planes),
            self.png_info.height,
            self.png_info.depth,
            self.filter_unit(),
            materialize,
            shift
        );

        Ok(PngImage {
            width: info.width,
            height: info.height,
            info,
            rows
        })
    }

    /// The byte stride the scanline filters look back by: one whole
    /// pixel, at least one byte.
    const fn filter_unit(&self) -> usize
    {
        let bytes_per_pixel =
            (self.png_info.planes as usize) * (self.png_info.depth as usize) / 8;

        if bytes_per_pixel == 0
        {
            1
        }
        else
        {
            bytes_per_pixel
        }
    }

    /// Inflate the accumulated `IDAT` payload.
    ///
    /// Deflate does not store its decompressed size, so the inflate
    /// crate owns the output allocation and resizes at will; the
    /// scanline pass afterwards validates the byte count.
    fn inflate(&mut self) -> Result<Vec<u8>, PngDecodeErrors>
    {
        let mut decoder = pixa_inflate::DeflateDecoder::new(&self.idat_chunks);

        decoder.decode_zlib().map_err(PngDecodeErrors::InflateErrors)
    }
}
