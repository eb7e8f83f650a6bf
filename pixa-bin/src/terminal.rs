//! Rendering of decoded rows as xterm-256 background swatches.
//!
//! Each pixel becomes two background-colored spaces on the 6x6x6
//! color cube, rows end with an attribute reset so the terminal is
//! left clean.

use std::io::Write;

use pixa_png::{Background, PngImage, PngInfo};

/// Red, green and blue levels of the xterm 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// The cube level closest to an 8-bit channel value.
fn nearest_cube_level(value: u8) -> u8
{
    let mut best = 0;
    let mut best_distance = i32::MAX;

    for (position, level) in CUBE_LEVELS.iter().enumerate()
    {
        let distance = (i32::from(value) - i32::from(*level)).abs();

        if distance < best_distance
        {
            best = position;
            best_distance = distance;
        }
    }
    best as u8
}

/// Map an RGB triple to its xterm-256 color-cube index.
fn xterm_index(red: u8, green: u8, blue: u8) -> u8
{
    16 + 36 * nearest_cube_level(red) + 6 * nearest_cube_level(green) + nearest_cube_level(blue)
}

/// Widen a sample of any decoded depth to the 8-bit range.
fn scale_sample(value: u16, depth: u8) -> u8
{
    if depth == 16
    {
        return (value >> 8) as u8;
    }
    let max = (1_u32 << depth) - 1;

    ((u32::from(value) * 255 + max / 2) / max) as u8
}

/// The color transparent pixels blend over, from `bKGD` when present.
fn backdrop(info: &PngInfo) -> [u8; 3]
{
    match info.background
    {
        Some(Background::Luma(value)) =>
        {
            let level = scale_sample(value, info.depth);
            [level; 3]
        }
        Some(Background::Rgb([red, green, blue])) => [
            scale_sample(red, info.depth),
            scale_sample(green, info.depth),
            scale_sample(blue, info.depth)
        ],
        Some(Background::Palette(index)) => *info
            .palette
            .get(usize::from(index))
            .unwrap_or(&[0, 0, 0]),
        None => [0, 0, 0]
    }
}

pub fn render<W: Write>(image: &mut PngImage, out: &mut W) -> Result<(), String>
{
    let planes = usize::from(image.info.planes);
    let depth = image.info.depth;
    let greyscale = image.info.greyscale;
    let has_alpha = image.info.alpha;
    let back = backdrop(&image.info);

    for row in image.rows()
    {
        let row = row.map_err(|reason| format!("{reason:?}"))?;

        for pixel in row.chunks_exact(planes)
        {
            let (red, green, blue) = if greyscale
            {
                let level = scale_sample(pixel[0], depth);
                (level, level, level)
            }
            else
            {
                (
                    scale_sample(pixel[0], depth),
                    scale_sample(pixel[1], depth),
                    scale_sample(pixel[2], depth)
                )
            };
            let alpha = if has_alpha
            {
                scale_sample(pixel[planes - 1], depth)
            }
            else
            {
                255
            };

            let [red, green, blue] = composite([red, green, blue], back, alpha);

            write!(out, "\x1b[48;5;{}m  ", xterm_index(red, green, blue))
                .map_err(|reason| format!("Could not write to terminal: {reason}"))?;
        }
        writeln!(out, "\x1b[0m")
            .map_err(|reason| format!("Could not write to terminal: {reason}"))?;
    }
    Ok(())
}

fn composite(pixel: [u8; 3], back: [u8; 3], alpha: u8) -> [u8; 3]
{
    if alpha == 255
    {
        return pixel;
    }
    let mut out = [0; 3];

    for ((value, behind), channel) in pixel.iter().zip(&back).zip(&mut out)
    {
        let blended =
            (u32::from(*value) * u32::from(alpha) + u32::from(*behind) * (255 - u32::from(alpha)))
                / 255;

        *channel = blended as u8;
    }
    out
}
