//! Exif directory walker
//!
//! Drives one parse: container sniffing, the TIFF header, IFD0 and the
//! Exif, GPS and Interoperability sub-IFDs reached through pointer tags.
//! Every directory offset is recorded in a visited set so a pointer back
//! into an already read directory is reported instead of followed.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, SeekFrom};
use std::path::Path;

use log::{debug, info, warn};

use crate::exif::container::{Container, ContainerKind};
use crate::exif::document::{ExifDocument, TagGroup};
use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{limits, tags};
use crate::tiff::dictionary::{Namespace, TagDictionary, TagDictionarySet};
use crate::tiff::errors::{ErrorKind, ExifError, ExifResult};
use crate::tiff::header::ImageFileHeader;
use crate::tiff::ifd::Ifd;
use crate::tiff::reader::IfdReader;
use crate::tiff::validation;
use crate::tiff::value::DecodedValue;

/// What to do when a sub-IFD can not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubIfdPolicy {
    /// Keep the document, leave the group empty and record the failure
    #[default]
    Degrade,
    /// Fail the whole parse
    Strict,
}

/// Parse configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub sub_ifd_policy: SubIfdPolicy,
    /// Follow the Interoperability pointer in the Exif sub-IFD
    pub follow_interop: bool,
    /// Largest value a single tag may declare
    pub max_value_bytes: u64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            sub_ifd_policy: SubIfdPolicy::Degrade,
            follow_interop: true,
            max_value_bytes: limits::DEFAULT_MAX_VALUE_BYTES,
        }
    }
}

/// Parse stages, used for logging and error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    Container,
    Header,
    Ifd0,
    SubIfd(Namespace),
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Container => f.write_str("container"),
            ParseStage::Header => f.write_str("TIFF header"),
            ParseStage::Ifd0 => f.write_str("IFD0"),
            ParseStage::SubIfd(namespace) => write!(f, "{} sub-IFD", namespace),
        }
    }
}

/// Builder for ExifReader
///
/// Provides a clean way to construct an ExifReader with various configurations.
pub struct ExifReaderBuilder<'a> {
    dictionaries: &'a TagDictionarySet,
    options: ParseOptions,
}

impl ExifReaderBuilder<'static> {
    /// Create a builder using the standard dictionaries and default options
    pub fn new() -> Self {
        ExifReaderBuilder {
            dictionaries: TagDictionarySet::standard(),
            options: ParseOptions::default(),
        }
    }
}

impl Default for ExifReaderBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ExifReaderBuilder<'a> {
    /// Use another set of tag dictionaries
    pub fn dictionaries<'b>(self, dictionaries: &'b TagDictionarySet) -> ExifReaderBuilder<'b> {
        ExifReaderBuilder { dictionaries, options: self.options }
    }

    pub fn sub_ifd_policy(mut self, policy: SubIfdPolicy) -> Self {
        self.options.sub_ifd_policy = policy;
        self
    }

    pub fn follow_interop(mut self, follow: bool) -> Self {
        self.options.follow_interop = follow;
        self
    }

    pub fn max_value_bytes(mut self, max_value_bytes: u64) -> Self {
        self.options.max_value_bytes = max_value_bytes;
        self
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the ExifReader
    pub fn build(self) -> ExifReader<'a> {
        ExifReader { dictionaries: self.dictionaries, options: self.options }
    }
}

/// Reader for Exif metadata in TIFF and JPEG files
///
/// Holds no per-parse state, so one reader can be shared between threads
/// parsing separate streams.
#[derive(Debug, Clone, Copy)]
pub struct ExifReader<'a> {
    dictionaries: &'a TagDictionarySet,
    options: ParseOptions,
}

impl ExifReader<'static> {
    /// Creates a reader with the standard dictionaries and default options
    pub fn new() -> Self {
        ExifReaderBuilder::new().build()
    }

    pub fn builder() -> ExifReaderBuilder<'static> {
        ExifReaderBuilder::new()
    }
}

impl Default for ExifReader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ExifReader<'a> {
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn dictionaries(&self) -> &'a TagDictionarySet {
        self.dictionaries
    }

    /// Loads and parses a file
    ///
    /// # Arguments
    /// * `filepath` - Path to a TIFF or JPEG file
    pub fn load(&self, filepath: &str) -> ExifResult<ExifDocument> {
        info!("Loading file: {}", filepath);
        let file = File::open(Path::new(filepath))?;
        let mut reader = BufReader::new(file);
        self.parse(&mut reader)
    }

    /// Parses the metadata of a TIFF or JPEG stream
    ///
    /// The stream position afterwards is unspecified.
    pub fn parse(&self, reader: &mut dyn SeekableReader) -> ExifResult<ExifDocument> {
        let container = Container::sniff(reader).map_err(|e| e.in_stage(ParseStage::Container.to_string()))?;

        let document = match container.kind {
            ContainerKind::Tiff => {
                reader.seek(SeekFrom::Start(0))?;
                self.parse_tiff(reader, container.payload.length, ContainerKind::Tiff)?
            }
            ContainerKind::Jpeg => {
                reader.seek(SeekFrom::Start(container.payload.offset))?;
                let mut payload = vec![0u8; container.payload.length as usize];
                reader
                    .read_exact(&mut payload)
                    .map_err(|e| ExifError::from(e).in_stage(ParseStage::Container.to_string()))?;

                let length = payload.len() as u64;
                let mut cursor = Cursor::new(payload);
                self.parse_tiff(&mut cursor, length, ContainerKind::Jpeg)?
            }
        };

        info!(
            "Parsed {} tags from {} container ({})",
            document.tag_count(),
            document.container(),
            document.byte_order().name()
        );
        Ok(document)
    }

    /// Walks the TIFF structure of a stream whose header is at offset 0
    fn parse_tiff(
        &self,
        reader: &mut dyn SeekableReader,
        stream_len: u64,
        container: ContainerKind,
    ) -> ExifResult<ExifDocument> {
        let header = ImageFileHeader::read(reader).map_err(|e| e.in_stage(ParseStage::Header.to_string()))?;
        debug!("Stage: {} done, IFD0 at {}", ParseStage::Header, header.ifd0_offset);

        let ifd_reader = IfdReader::new(header.byte_order, stream_len).with_max_value_bytes(self.options.max_value_bytes);
        let mut walk = DirectoryWalk::new(ifd_reader, header.ifd0_offset);

        let ifd0 = walk
            .read_ifd0(reader, header.ifd0_offset, &self.dictionaries.ifd0)
            .map_err(|e| e.in_stage(ParseStage::Ifd0.to_string()))?;
        debug!("Stage: {} done, {} entries", ParseStage::Ifd0, ifd0.entries.len());

        let mut document = ExifDocument::new(container, header.byte_order);

        let exif = self.follow_pointer(&mut walk, reader, &mut document, &ifd0, tags::EXIF_IFD_POINTER, Namespace::Exif)?;
        let gps = self.follow_pointer(&mut walk, reader, &mut document, &ifd0, tags::GPS_IFD_POINTER, Namespace::Gps)?;
        let interop = match (&exif, self.options.follow_interop) {
            (Some(exif), true) => {
                self.follow_pointer(&mut walk, reader, &mut document, exif, tags::INTEROP_IFD_POINTER, Namespace::Interop)?
            }
            _ => None,
        };

        let groups = [(Namespace::Ifd0, Some(ifd0)), (Namespace::Exif, exif), (Namespace::Gps, gps), (Namespace::Interop, interop)];
        for (namespace, ifd) in groups {
            if let Some(ifd) = ifd {
                document.set_group(namespace, TagGroup::from_ifd(ifd));
            }
        }

        Ok(document)
    }

    /// Follows one pointer tag of `parent`, applying the sub-IFD policy
    ///
    /// Returns `None` when the pointer is absent or the directory was
    /// degraded. Cycles are fatal under either policy.
    fn follow_pointer(
        &self,
        walk: &mut DirectoryWalk,
        reader: &mut dyn SeekableReader,
        document: &mut ExifDocument,
        parent: &Ifd,
        pointer_tag: u16,
        namespace: Namespace,
    ) -> ExifResult<Option<Ifd>> {
        let stage = ParseStage::SubIfd(namespace);
        let Some(value) = parent.get_value(pointer_tag) else {
            debug!("No {} pointer (tag {})", namespace, pointer_tag);
            return Ok(None);
        };

        let result = pointer_offset(value, walk.ifd_reader.byte_order())
            .ok_or_else(|| ExifError::GenericError(format!("pointer tag {} is not an offset: {}", pointer_tag, value)))
            .and_then(|offset| walk.read_sub_ifd(reader, offset, self.dictionaries.for_namespace(namespace)));

        match result {
            Ok(ifd) => {
                debug!("Stage: {} done, {} entries", stage, ifd.entries.len());
                Ok(Some(ifd))
            }
            Err(e) if e.kind() == ErrorKind::StructuralCycle => Err(e.in_stage(stage.to_string())),
            Err(e) => match self.options.sub_ifd_policy {
                SubIfdPolicy::Strict => Err(e.in_stage(stage.to_string())),
                SubIfdPolicy::Degrade => {
                    warn!("Dropping {}: {}", stage, e);
                    document.mark_degraded(namespace, e.to_string());
                    Ok(None)
                }
            },
        }
    }
}

/// Per-parse state: the IFD reader and every directory offset seen so far
struct DirectoryWalk {
    ifd_reader: IfdReader,
    visited: HashSet<u32>,
}

impl DirectoryWalk {
    fn new(ifd_reader: IfdReader, ifd0_offset: u32) -> Self {
        let mut visited = HashSet::new();
        visited.insert(ifd0_offset);
        DirectoryWalk { ifd_reader, visited }
    }

    /// Reads IFD0; its sibling chain is not walked, only checked for a loop
    fn read_ifd0(&self, reader: &mut dyn SeekableReader, offset: u32, dictionary: &TagDictionary) -> ExifResult<Ifd> {
        let ifd = self.ifd_reader.read_ifd(reader, offset, dictionary)?;
        check_next_offset(&ifd, &self.visited)?;
        Ok(ifd)
    }

    /// Reads the sub-IFD at `offset`, recording it as visited
    fn read_sub_ifd(&mut self, reader: &mut dyn SeekableReader, offset: u32, dictionary: &TagDictionary) -> ExifResult<Ifd> {
        if !self.visited.insert(offset) {
            return Err(ExifError::StructuralCycle(offset));
        }
        validation::validate_ifd_offset(offset)?;

        let ifd = self.ifd_reader.read_ifd(reader, offset, dictionary)?;
        check_next_offset(&ifd, &self.visited)?;
        Ok(ifd)
    }
}

/// Fails when a directory's next offset points to a visited directory
fn check_next_offset(ifd: &Ifd, visited: &HashSet<u32>) -> ExifResult<()> {
    if ifd.has_next() && visited.contains(&ifd.next_offset) {
        return Err(ExifError::StructuralCycle(ifd.next_offset));
    }
    Ok(())
}

/// Interprets a pointer tag's value as a directory offset
fn pointer_offset(value: &DecodedValue, byte_order: ByteOrder) -> Option<u32> {
    match value {
        DecodedValue::Raw(bytes) if bytes.len() == 4 => Some(byte_order.u32_from(bytes)),
        other => other.as_offset(),
    }
}
