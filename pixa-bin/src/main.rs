use std::ffi::OsString;
use std::process::exit;

use clap::ArgMatches;
use log::error;
use pixa_core::options::DecoderOptions;
use pixa_png::{PngDecoder, PngImage};

mod cmd_args;
mod terminal;

fn main()
{
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_args::setup_logger(&options);

    if let Err(reason) = run(&options)
    {
        println!();
        error!(" Could not complete decoding, reason: {reason}");
        println!();
        exit(-1);
    }
}

fn run(options: &ArgMatches) -> Result<(), String>
{
    let decoder_options = DecoderOptions::default()
        .set_max_width(*options.get_one::<usize>("max-width").unwrap())
        .set_max_height(*options.get_one::<usize>("max-height").unwrap())
        .set_strict_mode(options.get_flag("strict"));

    let path = options.get_one::<OsString>("in").unwrap();
    let contents =
        std::fs::read(path).map_err(|reason| format!("Could not read {path:?}: {reason}"))?;

    let mut image = PngDecoder::new_with_options(&contents, decoder_options)
        .decode()
        .map_err(|reason| format!("{reason:?}"))?;

    if options.get_flag("probe")
    {
        print_descriptor(path, &image);
        return Ok(());
    }

    let stdout = std::io::stdout();

    terminal::render(&mut image, &mut stdout.lock())
}

fn print_descriptor(path: &OsString, image: &PngImage)
{
    let colorspace = image.colorspace();

    println!("{path:?}");
    println!("  dimensions : {}x{}", image.width, image.height);
    println!(
        "  colorspace : {:?}, {} component(s)",
        colorspace,
        colorspace.num_components()
    );
    match image.depth()
    {
        Some(depth) => println!(
            "  bit depth  : {}, samples up to {}",
            depth.bit_size(),
            depth.max_value()
        ),
        None => println!("  bit depth  : {} (sBIT narrowed)", image.info.depth)
    }

    if let Some(gamma) = image.info.gamma
    {
        println!("  gamma      : {gamma}");
    }
    if let Some(density) = image.info.pixel_density
    {
        let unit = if density.unit_is_meter { "per meter" } else { "aspect only" };

        println!(
            "  density    : {}x{} {unit}",
            density.pixels_per_unit_x, density.pixels_per_unit_y
        );
    }
    if !image.info.palette.is_empty()
    {
        println!("  palette    : {} entries", image.info.palette.len());
    }
}
