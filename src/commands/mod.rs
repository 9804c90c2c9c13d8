//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod show_command;
pub mod analyze_command;

pub use command_traits::{Command, CommandFactory};
pub use show_command::ShowCommand;
pub use analyze_command::AnalyzeCommand;

use clap::ArgMatches;

use crate::exif::walker::{ExifReader, SubIfdPolicy};
use crate::tiff::dictionary::TagDictionarySet;
use crate::tiff::errors::{ExifError, ExifResult};

/// Factory for creating command instances based on CLI arguments
pub struct ExifkitCommandFactory;

impl ExifkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ExifkitCommandFactory
    }
}

impl Default for ExifkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ExifkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, dictionaries: &'a TagDictionarySet) -> ExifResult<Box<dyn Command + 'a>> {
        if args.get_flag("analyze") {
            Ok(Box::new(AnalyzeCommand::new(args, dictionaries)?))
        } else {
            // Default to listing tags
            Ok(Box::new(ShowCommand::new(args, dictionaries)?))
        }
    }
}

/// Input file argument shared by all commands
pub(crate) fn input_file(args: &ArgMatches) -> ExifResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))
}

/// Builds the reader configured by `--strict` and `--no-interop`
pub(crate) fn reader_from_args<'a>(args: &ArgMatches, dictionaries: &'a TagDictionarySet) -> ExifReader<'a> {
    let policy = if args.get_flag("strict") { SubIfdPolicy::Strict } else { SubIfdPolicy::Degrade };

    ExifReader::builder()
        .dictionaries(dictionaries)
        .sub_ifd_policy(policy)
        .follow_interop(!args.get_flag("no-interop"))
        .build()
}
