//! Tag listing command
//!
//! Prints every decoded tag as one line: namespace, name, field type and
//! value, optionally restricted to one namespace and with values
//! translated to readable descriptions.

use clap::ArgMatches;
use log::{debug, warn};

use crate::commands::command_traits::Command;
use crate::commands::{input_file, reader_from_args};
use crate::exif::document::{ExifDocument, Tag};
use crate::exif::walker::ExifReader;
use crate::tiff::dictionary::{Namespace, TagDictionarySet};
use crate::tiff::errors::ExifResult;
use crate::utils::tag_translators;

/// Command for listing the tags of a file
pub struct ShowCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Only list this namespace
    namespace: Option<Namespace>,
    /// Translate values to descriptions
    readable: bool,
    reader: ExifReader<'a>,
}

impl<'a> ShowCommand<'a> {
    /// Create a new show command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `dictionaries` - Tag dictionaries for the reader
    pub fn new(args: &ArgMatches, dictionaries: &'a TagDictionarySet) -> ExifResult<Self> {
        let namespace = args
            .get_one::<String>("namespace")
            .map(|ns| ns.parse::<Namespace>())
            .transpose()?;

        Ok(ShowCommand {
            input_file: input_file(args)?,
            namespace,
            readable: args.get_flag("readable"),
            reader: reader_from_args(args, dictionaries),
        })
    }

    /// One listing line for a tag
    pub fn format_line(&self, namespace: Namespace, tag: &Tag) -> String {
        let value = if self.readable {
            tag_translators::describe(namespace, tag)
        } else {
            tag.value.to_string()
        };
        format!("{:<8} {:<32} {:<10} {}", namespace, tag.name, tag.field_type.name(), value)
    }

    fn selected_namespaces(&self, document: &ExifDocument) -> Vec<Namespace> {
        match self.namespace {
            Some(namespace) => vec![namespace],
            None => document.namespaces(),
        }
    }
}

impl<'a> Command for ShowCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        debug!("Listing tags of {}", self.input_file);
        let document = self.reader.load(&self.input_file)?;

        for namespace in self.selected_namespaces(&document) {
            for tag in document.group(namespace) {
                println!("{}", self.format_line(namespace, tag));
            }
        }

        for degraded in document.degraded() {
            warn!("{} directory could not be read: {}", degraded.namespace, degraded.reason);
        }

        Ok(())
    }
}
