//! Per-chunk parsers.
//!
//! Each parser consumes its chunk's payload and the four trailing CRC
//! bytes. CRCs are never verified; a file that lies about its
//! checksums still decodes.

use log::{info, trace, warn};

use crate::decoder::{Background, PixelDensity, PngChunk, PngDecoder};
use crate::enums::PngColor;
use crate::error::PngDecodeErrors;

impl<'a> PngDecoder<'a>
{
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.seen_hdr
        {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR chunks"));
        }
        if chunk.length != 13
        {
            return Err(PngDecodeErrors::InvalidChunkLength("IHDR", chunk.length));
        }

        let width = self.stream.get_u32_be() as usize;
        let height = self.stream.get_u32_be() as usize;

        if width == 0 || height == 0
        {
            return Err(PngDecodeErrors::GenericStatic("Width or height is zero"));
        }
        if width > self.options.get_max_width()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Image width {}, larger than the configured maximum of {}",
                width,
                self.options.get_max_width()
            )));
        }
        if height > self.options.get_max_height()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Image height {}, larger than the configured maximum of {}",
                height,
                self.options.get_max_height()
            )));
        }

        let depth = self.stream.get_u8();
        let color = self.stream.get_u8();

        self.color = PngColor::from_int(color)
            .ok_or(PngDecodeErrors::GenericStatic("Unknown color type value"))?;

        let depth_ok = match self.color
        {
            PngColor::Luma => matches!(depth, 1 | 2 | 4 | 8 | 16),
            PngColor::Palette => matches!(depth, 1 | 2 | 4 | 8),
            _ => matches!(depth, 8 | 16)
        };
        if !depth_ok
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Bit depth {depth} not allowed for color type {color}"
            )));
        }

        if self.stream.get_u8() != 0
        {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }
        if self.stream.get_u8() != 0
        {
            return Err(PngDecodeErrors::GenericStatic("Unknown filter method"));
        }

        let interlace = self.stream.get_u8();

        if interlace != 0
        {
            warn!("Interlace flag set, scanlines are decoded as if sequential");
        }

        self.stream.skip(4);

        let planes = self.color.num_planes();

        self.png_info.width = width;
        self.png_info.height = height;
        self.png_info.depth = depth;
        self.png_info.planes = planes;
        self.png_info.greyscale = self.color.is_greyscale();
        self.png_info.alpha = self.color.has_alpha();

        self.row_bytes = (width * usize::from(planes) * usize::from(depth) + 7) / 8;
        self.seen_hdr = true;

        info!("Width: {width}, height: {height}");
        info!("Depth: {depth}, color type: {:?}", self.color);

        Ok(())
    }

    pub(crate) fn parse_plte(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.late_chunk(chunk)?
        {
            return Ok(());
        }
        if chunk.length == 0 || chunk.length % 3 != 0
        {
            return Err(PngDecodeErrors::InvalidChunkLength("PLTE", chunk.length));
        }

        let entries = chunk.length / 3;
        let most = if self.color.is_palette()
        {
            1_usize << self.png_info.depth
        }
        else
        {
            256
        };

        if entries > most
        {
            return Err(PngDecodeErrors::InvalidChunkLength("PLTE", chunk.length));
        }

        // unreferenced entries stay at the opaque-black default
        self.palette.resize(256, Default::default());

        for entry in self.palette.iter_mut().take(entries)
        {
            entry.red = self.stream.get_u8();
            entry.green = self.stream.get_u8();
            entry.blue = self.stream.get_u8();
        }
        self.palette_len = entries;
        self.seen_plte = true;

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_trns(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.late_chunk(chunk)?
        {
            return Ok(());
        }

        match self.color
        {
            PngColor::Luma =>
            {
                if chunk.length != 2
                {
                    return Err(PngDecodeErrors::InvalidChunkLength("tRNS", chunk.length));
                }
                let value = self.stream.get_u16_be();

                self.png_info.transparent = Some([value, 0, 0]);
            }
            PngColor::RGB =>
            {
                if chunk.length != 6
                {
                    return Err(PngDecodeErrors::InvalidChunkLength("tRNS", chunk.length));
                }
                let red = self.stream.get_u16_be();
                let green = self.stream.get_u16_be();
                let blue = self.stream.get_u16_be();

                self.png_info.transparent = Some([red, green, blue]);
            }
            PngColor::Palette =>
            {
                if !self.seen_plte
                {
                    return Err(PngDecodeErrors::MissingRequiredChunk("PLTE"));
                }
                if chunk.length > self.palette_len
                {
                    return Err(PngDecodeErrors::InvalidChunkLength("tRNS", chunk.length));
                }
                for entry in self.palette.iter_mut().take(chunk.length)
                {
                    entry.alpha = self.stream.get_u8();
                }
            }
            _ =>
            {
                return Err(PngDecodeErrors::GenericStatic(
                    "tRNS chunk not allowed for images with an alpha channel"
                ));
            }
        }
        self.seen_trns = true;

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_bkgd(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.late_chunk(chunk)?
        {
            return Ok(());
        }

        let background = match self.color
        {
            PngColor::Palette =>
            {
                if !self.seen_plte
                {
                    return Err(PngDecodeErrors::MissingRequiredChunk("PLTE"));
                }
                if chunk.length != 1
                {
                    return Err(PngDecodeErrors::InvalidChunkLength("bKGD", chunk.length));
                }
                Background::Palette(self.stream.get_u8())
            }
            PngColor::Luma | PngColor::LumaA =>
            {
                if chunk.length != 2
                {
                    return Err(PngDecodeErrors::InvalidChunkLength("bKGD", chunk.length));
                }
                Background::Luma(self.stream.get_u16_be())
            }
            _ =>
            {
                if chunk.length != 6
                {
                    return Err(PngDecodeErrors::InvalidChunkLength("bKGD", chunk.length));
                }
                let red = self.stream.get_u16_be();
                let green = self.stream.get_u16_be();
                let blue = self.stream.get_u16_be();

                Background::Rgb([red, green, blue])
            }
        };
        self.png_info.background = Some(background);

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_gama(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.late_chunk(chunk)?
        {
            return Ok(());
        }
        if chunk.length != 4
        {
            return Err(PngDecodeErrors::InvalidChunkLength("gAMA", chunk.length));
        }

        let value = self.stream.get_u32_be();

        if value == 0
        {
            if self.options.get_strict_mode()
            {
                return Err(PngDecodeErrors::GenericStatic("Zero gamma value"));
            }
            warn!("Zero gamma value, falling back to 1/2.2");
            self.png_info.gamma = Some(1.0 / 2.2);
        }
        else
        {
            self.png_info.gamma = Some(value as f32 / 100_000.0);
        }

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_sbit(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.late_chunk(chunk)?
        {
            return Ok(());
        }

        let expected = if self.color.is_palette()
        {
            3
        }
        else
        {
            usize::from(self.png_info.planes)
        };

        if chunk.length != expected
        {
            return Err(PngDecodeErrors::InvalidChunkLength("sBIT", chunk.length));
        }

        self.sbit = self
            .stream
            .get(chunk.length)
            .map_err(|_| PngDecodeErrors::UnexpectedEof)?
            .to_vec();

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_phys(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.late_chunk(chunk)?
        {
            return Ok(());
        }
        if chunk.length != 9
        {
            return Err(PngDecodeErrors::InvalidChunkLength("pHYs", chunk.length));
        }

        let pixels_per_unit_x = self.stream.get_u32_be();
        let pixels_per_unit_y = self.stream.get_u32_be();
        let unit = self.stream.get_u8();

        self.png_info.pixel_density = Some(PixelDensity {
            pixels_per_unit_x,
            pixels_per_unit_y,
            unit_is_meter: unit == 1
        });

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.color.is_palette() && !self.seen_plte
        {
            return Err(PngDecodeErrors::MissingRequiredChunk("PLTE"));
        }

        let bytes = self
            .stream
            .get(chunk.length)
            .map_err(|_| PngDecodeErrors::UnexpectedEof)?;

        self.idat_chunks.extend_from_slice(bytes);
        self.seen_idat = true;

        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn skip_unknown(&mut self, chunk: PngChunk)
    {
        trace!(
            "Skipping unknown chunk {:?}",
            String::from_utf8_lossy(&chunk.tag)
        );
        self.stream.skip(chunk.length + 4);
    }

    /// Metadata chunks appearing after the first `IDAT` violate chunk
    /// ordering; skip them with a warning, or reject them when strict.
    fn late_chunk(&mut self, chunk: PngChunk) -> Result<bool, PngDecodeErrors>
    {
        if !self.seen_idat
        {
            return Ok(false);
        }
        if self.options.get_strict_mode()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "{:?} chunk found after image data",
                String::from_utf8_lossy(&chunk.tag)
            )));
        }
        warn!(
            "Ignoring {:?} chunk found after image data",
            String::from_utf8_lossy(&chunk.tag)
        );
        self.stream.skip(chunk.length + 4);

        Ok(true)
    }
}
