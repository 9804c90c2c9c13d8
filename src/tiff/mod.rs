//! TIFF structure parsing module
//!
//! This module provides the structures and functions for reading the TIFF
//! header and Image File Directories that carry Exif metadata.

pub mod errors;
pub mod ifd;
pub mod types;
pub mod value;
pub mod reader;
pub mod header;
pub mod decoder;
pub mod dictionary;
pub(crate) mod constants;
pub(crate) mod validation;
#[cfg(test)]
pub(crate) mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use dictionary::{Namespace, TagDictionary, TagDictionarySet};
pub use errors::{ErrorKind, ExifError, ExifResult};
pub use header::ImageFileHeader;
pub use ifd::{Ifd, IfdEntry, TagRecord, ValueLocation};
pub use reader::IfdReader;
pub use types::ScalarType;
pub use value::DecodedValue;
