//! A PNG decoder.
//!
//! Decodes the baseline PNG format into a lazy stream of scanline
//! sample rows. Supported along the way are
//!
//! - All five color types at bit depths 1, 2, 4, 8 and 16.
//! - Palette expansion to RGB or, with a `tRNS` chunk, RGBA.
//! - The `bKGD`, `gAMA`, `sBIT` and `pHYs` ancillary chunks.
//!
//! Interlaced images are not deinterlaced and chunk CRCs are never
//! verified.
//!
//! # Usage
//! ```no_run
//! use pixa_png::PngDecoder;
//!
//! let data = std::fs::read("image.png").unwrap();
//!
//! let mut image = PngDecoder::new(&data).decode().unwrap();
//!
//! for row in image.rows()
//! {
//!     let samples: Vec<u16> = row.unwrap();
//! }
//! ```
pub use crate::decoder::{Background, PixelDensity, PngDecoder, PngImage, PngInfo};
pub use crate::error::PngDecodeErrors;
pub use crate::rows::Rows;

mod constants;
mod decoder;
mod enums;
mod error;
mod filters;
mod headers;
mod rows;
mod utils;
