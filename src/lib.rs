pub mod io;
pub mod tiff;
pub mod exif;
pub mod utils;
pub mod commands;

pub use exif::{ExifDocument, ExifReader, ExifReaderBuilder, ParseOptions, SubIfdPolicy, Tag, TagGroup};
pub use tiff::{DecodedValue, ErrorKind, ExifError, ExifResult, Namespace, TagDictionarySet};

use crate::io::seekable::SeekableReader;

/// Parses a TIFF or JPEG stream with the default configuration
pub fn parse(reader: &mut dyn SeekableReader) -> ExifResult<ExifDocument> {
    ExifReader::new().parse(reader)
}

/// Parses a TIFF or JPEG file with the default configuration
pub fn parse_file(path: &str) -> ExifResult<ExifDocument> {
    ExifReader::new().load(path)
}
