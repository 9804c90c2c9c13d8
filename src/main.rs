use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use exifkit::commands::{CommandFactory, ExifkitCommandFactory};
use exifkit::tiff::TagDictionarySet;

fn main() {
    let matches = ClapCommand::new("exifkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read Exif metadata from TIFF and JPEG files")
        .arg(
            Arg::new("input")
                .help("Input TIFF or JPEG file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("analyze")
                .short('a')
                .long("analyze")
                .help("Summarise the metadata structure instead of listing tags")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("namespace")
                .short('n')
                .long("namespace")
                .help("Only list tags of this namespace (ifd0, exif, gps, interop)")
                .value_name("NS")
                .required(false),
        )
        .arg(
            Arg::new("readable")
                .short('r')
                .long("readable")
                .help("Translate enumerated and structured values to descriptions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when a sub-IFD can not be read instead of skipping it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-interop")
                .long("no-interop")
                .help("Do not follow the Interoperability pointer")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tags")
                .long("tags")
                .help("TOML file with tag names replacing the built-in dictionaries")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let custom_dictionaries;
    let dictionaries = match matches.get_one::<String>("tags") {
        Some(path) => match TagDictionarySet::from_file(path) {
            Ok(set) => {
                custom_dictionaries = set;
                &custom_dictionaries
            }
            Err(e) => {
                error!("Failed to load tag dictionaries: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => TagDictionarySet::standard(),
    };

    let factory = ExifkitCommandFactory::new();

    let command_result = factory.create_command(&matches, dictionaries);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
