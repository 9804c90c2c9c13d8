//! Exif structure analysis command
//!
//! This module implements the command for summarising the structure of
//! the metadata in a file: container, byte order and the directories found.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_file, reader_from_args};
use crate::exif::document::{ExifDocument, TagGroup};
use crate::exif::walker::ExifReader;
use crate::tiff::dictionary::{Namespace, TagDictionarySet};
use crate::tiff::errors::ExifResult;

/// Number of tags listed per directory
const MAX_LISTED_TAGS: usize = 10;

/// Command for analyzing Exif structure
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to list every tag instead of the first few
    verbose: bool,
    reader: ExifReader<'a>,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `dictionaries` - Tag dictionaries for the reader
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, dictionaries: &'a TagDictionarySet) -> ExifResult<Self> {
        Ok(AnalyzeCommand {
            input_file: input_file(args)?,
            verbose: args.get_flag("verbose"),
            reader: reader_from_args(args, dictionaries),
        })
    }

    /// Display container and byte order
    fn display_summary(&self, document: &ExifDocument) {
        info!("Exif Analysis Results:");
        info!("  Container: {}", document.container());
        info!("  Byte order: {}", document.byte_order().name());
        info!("  Total tags: {}", document.tag_count());
    }

    /// Display one directory: its size, degradation state and first tags
    fn display_group(&self, document: &ExifDocument, namespace: Namespace) {
        let group = document.group(namespace);

        if let Some(degraded) = document.degraded().iter().find(|d| d.namespace == namespace) {
            info!("\n{}: unreadable ({})", namespace, degraded.reason);
            return;
        }
        if group.is_empty() {
            info!("\n{}: not present", namespace);
            return;
        }

        info!("\n{}: {} tags", namespace, group.len());
        self.display_tag_summary(group);
    }

    fn display_tag_summary(&self, group: &TagGroup) {
        let limit = if self.verbose { group.len() } else { MAX_LISTED_TAGS };
        for tag in group.iter().take(limit) {
            info!("    Tag {} ({}): {} x{} = {}", tag.id, tag.name, tag.field_type, tag.count, tag.value);
        }
        if group.len() > limit {
            info!("    ... ({} more tags)", group.len() - limit);
        }
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        info!("Analyzing file: {}", self.input_file);
        let document = self.reader.load(&self.input_file)?;

        self.display_summary(&document);
        for namespace in Namespace::ALL {
            self.display_group(&document, namespace);
        }

        Ok(())
    }
}
