//! Container decoding tests over hand-assembled PNG files.
//!
//! Files are built chunk by chunk with real CRCs so the reference
//! `png` crate accepts them too where we cross-check.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pixa_png::{Background, PngDecodeErrors, PngDecoder};

fn crc32(data: &[u8]) -> u32
{
    let mut crc = 0xFFFF_FFFF_u32;

    for byte in data
    {
        crc ^= u32::from(*byte);
        for _ in 0..8
        {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8>
{
    let mut out = Vec::new();

    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);

    let mut checked = tag.to_vec();
    checked.extend_from_slice(payload);
    out.extend_from_slice(&crc32(&checked).to_be_bytes());

    out
}

fn ihdr(width: u32, height: u32, depth: u8, color: u8) -> Vec<u8>
{
    let mut payload = Vec::new();

    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[depth, color, 0, 0, 0]);

    chunk(b"IHDR", &payload)
}

fn zlib(raw: &[u8]) -> Vec<u8>
{
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));

    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

fn idat(scanlines: &[u8]) -> Vec<u8>
{
    chunk(b"IDAT", &zlib(scanlines))
}

fn build_png(chunks: &[Vec<u8>]) -> Vec<u8>
{
    let mut out = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    for piece in chunks
    {
        out.extend_from_slice(piece);
    }
    out
}

fn collect_rows(file: &[u8]) -> Vec<Vec<u16>>
{
    let mut image = PngDecoder::new(file).decode().unwrap();

    image.rows().map(|row| row.unwrap()).collect()
}

#[test]
fn empty_input_is_eof()
{
    assert!(matches!(
        PngDecoder::new(&[]).decode(),
        Err(PngDecodeErrors::UnexpectedEof)
    ));
}

#[test]
fn bad_signature_is_rejected()
{
    assert!(matches!(
        PngDecoder::new(b"JUNKJUNKJUNK").decode(),
        Err(PngDecodeErrors::InvalidSignature)
    ));
    // a cut-off signature is also a signature mismatch
    assert!(matches!(
        PngDecoder::new(&[0x89, b'P', b'N']).decode(),
        Err(PngDecodeErrors::InvalidSignature)
    ));
}

#[test]
fn grayscale_rows_come_out_unfiltered()
{
    // 4x3, filter 0 on every scanline
    let scanlines = [
        0, 10, 20, 30, 40, //
        0, 50, 60, 70, 80, //
        0, 90, 100, 110, 120
    ];
    let file = build_png(&[ihdr(4, 3, 8, 0), idat(&scanlines), chunk(b"IEND", &[])]);

    let mut image = PngDecoder::new(&file).decode().unwrap();

    assert_eq!(image.width, 4);
    assert_eq!(image.height, 3);
    assert_eq!(image.info.planes, 1);
    assert!(image.info.greyscale);

    let rows: Vec<Vec<u16>> = image.rows().map(|row| row.unwrap()).collect();

    assert_eq!(
        rows,
        vec![
            vec![10, 20, 30, 40],
            vec![50, 60, 70, 80],
            vec![90, 100, 110, 120]
        ]
    );
}

fn reference_paeth(a: u8, b: u8, c: u8) -> u8
{
    let (pa, pb, pc) = (
        (i32::from(b) - i32::from(c)).abs(),
        (i32::from(a) - i32::from(c)).abs(),
        (i32::from(a) + i32::from(b) - 2 * i32::from(c)).abs()
    );
    if pa <= pb && pa <= pc
    {
        a
    }
    else if pb <= pc
    {
        b
    }
    else
    {
        c
    }
}

/// The forward direction of the scanline filters, for assembling
/// filtered test scanlines from known pixels.
fn forward_filter(filter: u8, prev: &[u8], raw: &[u8], unit: usize) -> Vec<u8>
{
    let mut out = vec![0; raw.len()];

    for i in 0..raw.len()
    {
        let a = if i >= unit { raw[i - unit] } else { 0 };
        let b = prev[i];
        let c = if i >= unit { prev[i - unit] } else { 0 };

        let predictor = match filter
        {
            0 => 0,
            1 => a,
            2 => b,
            3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
            4 => reference_paeth(a, b, c),
            _ => unreachable!()
        };
        out[i] = raw[i].wrapping_sub(predictor);
    }
    out
}

#[test]
fn every_filter_reconstructs_like_the_reference()
{
    // 4x5 RGB, one scanline per filter type
    let width = 4_usize;
    let pixels: Vec<Vec<u8>> = (0..5)
        .map(|row| {
            (0..width * 3)
                .map(|i| (row * 31 + i * 7) as u8)
                .collect()
        })
        .collect();

    let mut scanlines = Vec::new();
    let mut prev = vec![0; width * 3];

    for (filter, raw) in (0..5).zip(&pixels)
    {
        scanlines.push(filter as u8);
        scanlines.extend(forward_filter(filter as u8, &prev, raw, 3));
        prev = raw.clone();
    }

    let file = build_png(&[
        ihdr(width as u32, 5, 8, 2),
        idat(&scanlines),
        chunk(b"IEND", &[])
    ]);

    // reference decode
    let decoder = png::Decoder::new(&file[..]);
    let mut reader = decoder.read_info().unwrap();
    let mut reference = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut reference).unwrap();
    reference.truncate(frame.buffer_size());

    let ours: Vec<u16> = collect_rows(&file).into_iter().flatten().collect();
    let reference: Vec<u16> = reference.iter().map(|x| u16::from(*x)).collect();

    assert_eq!(ours, reference);

    // and both must match the pixels the scanlines were built from
    let original: Vec<u16> = pixels
        .iter()
        .flatten()
        .map(|x| u16::from(*x))
        .collect();

    assert_eq!(ours, original);
}

#[test]
fn palette_rows_expand_to_rgb()
{
    let palette = [255, 0, 0, 0, 255, 0, 0, 0, 255, 17, 34, 51];
    let scanlines = [0, 0, 1, 2, 3, 0, 3, 2, 1, 0];

    let file = build_png(&[
        ihdr(4, 2, 8, 3),
        chunk(b"PLTE", &palette),
        idat(&scanlines),
        chunk(b"IEND", &[])
    ]);

    let mut image = PngDecoder::new(&file).decode().unwrap();

    assert_eq!(image.info.planes, 3);
    assert_eq!(image.info.depth, 8);
    assert!(!image.info.alpha);
    assert_eq!(
        image.info.palette,
        vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [17, 34, 51]]
    );

    let rows: Vec<Vec<u16>> = image.rows().map(|row| row.unwrap()).collect();

    assert_eq!(
        rows[0],
        vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 17, 34, 51]
    );
    assert_eq!(
        rows[1],
        vec![17, 34, 51, 0, 0, 255, 0, 255, 0, 255, 0, 0]
    );
}

#[test]
fn random_palette_indices_resolve_through_the_palette()
{
    use nanorand::{Rng, WyRand};

    let palette = [255, 0, 0, 0, 255, 0, 0, 0, 255, 17, 34, 51];
    let (width, height) = (32_usize, 32_usize);

    let mut rng = WyRand::new_seed(99);
    let indices: Vec<u8> = (0..width * height)
        .map(|_| rng.generate_range(0..4_u8))
        .collect();

    let mut scanlines = Vec::new();
    for row in indices.chunks_exact(width)
    {
        scanlines.push(0);
        scanlines.extend_from_slice(row);
    }

    let file = build_png(&[
        ihdr(width as u32, height as u32, 8, 3),
        chunk(b"PLTE", &palette),
        idat(&scanlines),
        chunk(b"IEND", &[])
    ]);

    let rows = collect_rows(&file);

    for (row, row_indices) in rows.iter().zip(indices.chunks_exact(width))
    {
        for (pixel, index) in row.chunks_exact(3).zip(row_indices)
        {
            let base = usize::from(*index) * 3;
            let expected: Vec<u16> = palette[base..base + 3]
                .iter()
                .map(|x| u16::from(*x))
                .collect();

            assert_eq!(pixel, expected);
        }
    }
}

#[test]
fn trns_grows_palette_rows_to_rgba()
{
    let palette = [255, 0, 0, 0, 255, 0, 0, 0, 255];
    // alphas for the first two entries, the third stays opaque
    let alphas = [128, 200];
    let scanlines = [0, 0, 1, 2];

    let file = build_png(&[
        ihdr(3, 1, 8, 3),
        chunk(b"PLTE", &palette),
        chunk(b"tRNS", &alphas),
        idat(&scanlines),
        chunk(b"IEND", &[])
    ]);

    let mut image = PngDecoder::new(&file).decode().unwrap();

    assert_eq!(image.info.planes, 4);
    assert!(image.info.alpha);

    let rows: Vec<Vec<u16>> = image.rows().map(|row| row.unwrap()).collect();

    assert_eq!(
        rows[0],
        vec![255, 0, 0, 128, 0, 255, 0, 200, 0, 0, 255, 255]
    );
}

#[test]
fn sixteen_bit_samples_are_big_endian()
{
    let scanlines = [
        0, 0x00, 0x00, 0xFF, 0xFF, //
        0, 0x01, 0x00, 0x02, 0x01
    ];
    let file = build_png(&[ihdr(2, 2, 16, 0), idat(&scanlines), chunk(b"IEND", &[])]);

    assert_eq!(
        collect_rows(&file),
        vec![vec![0, 65535], vec![256, 513]]
    );
}

#[test]
fn one_bit_rows_unpack_msb_first()
{
    // width 10, so the second byte carries six padding bits
    let scanlines = [0, 0b1010_1010, 0b1000_0000];
    let file = build_png(&[ihdr(10, 1, 1, 0), idat(&scanlines), chunk(b"IEND", &[])]);

    assert_eq!(
        collect_rows(&file),
        vec![vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0]]
    );
}

#[test]
fn idat_payloads_concatenate()
{
    // the compressed stream split across two IDAT chunks
    let compressed = zlib(&[0, 10, 20, 0, 30, 40]);
    let (first, second) = compressed.split_at(5);

    let file = build_png(&[
        ihdr(2, 2, 8, 0),
        chunk(b"IDAT", first),
        chunk(b"IDAT", second),
        chunk(b"IEND", &[])
    ]);

    assert_eq!(collect_rows(&file), vec![vec![10, 20], vec![30, 40]]);
}

#[test]
fn truncated_pixel_data_is_detected()
{
    // 2x2 grayscale needs 6 bytes of scanlines, give it 4
    let file = build_png(&[
        ihdr(2, 2, 8, 0),
        idat(&[0, 1, 2, 0]),
        chunk(b"IEND", &[])
    ]);

    assert!(matches!(
        PngDecoder::new(&file).decode(),
        Err(PngDecodeErrors::TruncatedImageData(6, 4))
    ));
}

#[test]
fn palette_image_without_plte_is_rejected()
{
    let file = build_png(&[ihdr(1, 1, 8, 3), idat(&[0, 0]), chunk(b"IEND", &[])]);

    assert!(matches!(
        PngDecoder::new(&file).decode(),
        Err(PngDecodeErrors::MissingRequiredChunk("PLTE"))
    ));
}

#[test]
fn non_alphabetic_chunk_tag_is_rejected()
{
    let file = build_png(&[ihdr(1, 1, 8, 0), chunk(b"ID4T", &[])]);

    assert!(matches!(
        PngDecoder::new(&file).decode(),
        Err(PngDecodeErrors::InvalidChunkType([b'I', b'D', b'4', b'T']))
    ));
}

#[test]
fn bad_filter_byte_surfaces_in_the_row_stream()
{
    let file = build_png(&[ihdr(1, 2, 8, 0), idat(&[0, 1, 9, 2]), chunk(b"IEND", &[])]);

    let mut image = PngDecoder::new(&file).decode().unwrap();
    let rows = image.rows();

    assert_eq!(rows.next().unwrap().unwrap(), vec![1]);
    assert!(matches!(
        rows.next(),
        Some(Err(PngDecodeErrors::InvalidFilterType(9)))
    ));
    // the stream fuses after the error
    assert!(rows.next().is_none());
}

#[test]
fn sbit_narrows_sample_precision()
{
    let file = build_png(&[
        ihdr(2, 1, 8, 0),
        chunk(b"sBIT", &[5]),
        idat(&[0, 0xFF, 0x48]),
        chunk(b"IEND", &[])
    ]);

    let mut image = PngDecoder::new(&file).decode().unwrap();

    assert_eq!(image.info.depth, 5);
    assert_eq!(
        image.rows().next().unwrap().unwrap(),
        vec![0xFF >> 3, 0x48 >> 3]
    );
}

#[test]
fn oversized_sbit_is_rejected()
{
    let file = build_png(&[
        ihdr(1, 1, 8, 0),
        chunk(b"sBIT", &[9]),
        idat(&[0, 0]),
        chunk(b"IEND", &[])
    ]);

    assert!(matches!(
        PngDecoder::new(&file).decode(),
        Err(PngDecodeErrors::InvalidSignificantBits(9, 8))
    ));
}

#[test]
fn ancillary_metadata_is_captured()
{
    let mut phys = Vec::new();
    phys.extend_from_slice(&2835_u32.to_be_bytes());
    phys.extend_from_slice(&2835_u32.to_be_bytes());
    phys.push(1);

    let file = build_png(&[
        ihdr(1, 1, 8, 0),
        chunk(b"gAMA", &45455_u32.to_be_bytes()),
        chunk(b"pHYs", &phys),
        chunk(b"bKGD", &300_u16.to_be_bytes()),
        idat(&[0, 0]),
        chunk(b"IEND", &[])
    ]);

    let image = PngDecoder::new(&file).decode().unwrap();

    assert!((image.info.gamma.unwrap() - 0.45455).abs() < 1e-6);
    assert_eq!(image.info.background, Some(Background::Luma(300)));

    let density = image.info.pixel_density.unwrap();
    assert_eq!(density.pixels_per_unit_x, 2835);
    assert!(density.unit_is_meter);
}

#[test]
fn unknown_chunks_are_skipped()
{
    let file = build_png(&[
        ihdr(1, 1, 8, 0),
        chunk(b"tEXt", b"Comment\0hello"),
        idat(&[0, 77]),
        chunk(b"IEND", &[])
    ]);

    assert_eq!(collect_rows(&file), vec![vec![77]]);
}

#[test]
fn chunk_crcs_are_never_verified()
{
    // same minimal file, with every CRC zeroed out
    let mut file = build_png(&[ihdr(1, 1, 8, 0), idat(&[0, 42]), chunk(b"IEND", &[])]);

    let mut offset = 8;
    while offset + 8 <= file.len()
    {
        let length = u32::from_be_bytes(file[offset..offset + 4].try_into().unwrap()) as usize;
        let crc_at = offset + 8 + length;

        file[crc_at..crc_at + 4].fill(0);
        offset = crc_at + 4;
    }

    assert_eq!(collect_rows(&file), vec![vec![42]]);
}

#[test]
fn reference_encoder_round_trips()
{
    // a compressible RGB gradient through the reference encoder
    let (width, height) = (64_u32, 48_u32);
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let x = i % width;
            let y = i / width;
            [(x * 4) as u8, (y * 5) as u8, ((x + y) * 2) as u8]
        })
        .collect();

    let mut file = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut file, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&pixels).unwrap();
        writer.finish().unwrap();
    }

    let ours: Vec<u16> = collect_rows(&file).into_iter().flatten().collect();
    let pixels: Vec<u16> = pixels.iter().map(|x| u16::from(*x)).collect();

    assert_eq!(ours, pixels);
}
