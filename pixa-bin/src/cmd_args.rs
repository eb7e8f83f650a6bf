use std::ffi::OsString;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, Level};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command
{
    Command::new("pixa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode a PNG file and preview it on the terminal")
        .arg(Arg::new("in")
            .help("Input PNG file")
            .required(true)
            .value_parser(value_parser!(OsString)))
        .arg(Arg::new("probe")
            .long("probe")
            .help("Decode and print the image descriptor instead of rendering")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("strict")
            .long("strict")
            .help("Treat recoverable oddities in the file as hard errors")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help("Maximum image width the decoder accepts")
            .value_parser(value_parser!(usize))
            .default_value("131072"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help("Maximum image height the decoder accepts")
            .value_parser(value_parser!(usize))
            .default_value("131072"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display debug information and above"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display information about the decoding options"))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches)
{
    let log_level;

    if *options.get_one::<bool>("debug").unwrap()
    {
        log_level = Level::Debug;
    }
    else if *options.get_one::<bool>("trace").unwrap()
    {
        log_level = Level::Trace;
    }
    else if *options.get_one::<bool>("warn").unwrap()
    {
        log_level = Level::Warn
    }
    else if *options.get_one::<bool>("info").unwrap()
    {
        log_level = Level::Info;
    }
    else
    {
        log_level = Level::Warn;
    }

    simple_logger::init_with_level(log_level).unwrap();

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
