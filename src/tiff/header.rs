//! TIFF Image File Header (IFH)
//!
//! The first 8 bytes of a TIFF stream: byte order magic, the version
//! number 42 and the offset of IFD0.

use log::debug;

use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{ExifError, ExifResult};
use crate::tiff::validation;

/// A validated Image File Header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFileHeader {
    pub byte_order: ByteOrder,
    pub version: u16,
    pub ifd0_offset: u32,
}

impl ImageFileHeader {
    /// Reads and validates the header at the current stream position
    ///
    /// Fails with a format error on a bad byte order magic, a version other
    /// than 42 or an IFD0 offset pointing inside the header.
    pub fn read(reader: &mut dyn SeekableReader) -> ExifResult<Self> {
        let mut bytes = [0u8; header::HEADER_SIZE as usize];
        reader.read_exact(&mut bytes)?;
        Self::parse(&bytes)
    }

    /// Parses and validates 8 header bytes
    pub fn parse(bytes: &[u8; 8]) -> ExifResult<Self> {
        let byte_order = ByteOrder::from_magic([bytes[0], bytes[1]])?;
        debug!("Detected byte order: {}", byte_order.name());

        let version = byte_order.u16_from(&bytes[2..4]);
        if version != header::TIFF_VERSION {
            return Err(ExifError::UnsupportedVersion(version));
        }

        let ifd0_offset = byte_order.u32_from(&bytes[4..8]);
        validation::validate_ifd_offset(ifd0_offset)?;
        debug!("IFD0 offset: {}", ifd0_offset);

        Ok(ImageFileHeader { byte_order, version, ifd0_offset })
    }
}
