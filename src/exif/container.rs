//! Container detection
//!
//! Exif metadata comes either as a plain TIFF stream or as a TIFF stream
//! embedded in the APP1 segment of a JPEG file. This module tells the two
//! apart and locates the TIFF payload.

use std::fmt;
use std::io::SeekFrom;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};

use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{header, jpeg};
use crate::tiff::errors::{ExifError, ExifResult};

/// The kind of file the metadata was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A raw TIFF stream
    Tiff,
    /// A JPEG stream with an APP1 Exif segment
    Jpeg,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Tiff => f.write_str("TIFF"),
            ContainerKind::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// Location of the TIFF stream inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffPayload {
    /// Offset of the TIFF header in the container
    pub offset: u64,
    /// Length of the TIFF stream
    pub length: u64,
}

/// A detected container and the TIFF payload it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub kind: ContainerKind,
    pub payload: TiffPayload,
}

impl Container {
    /// Detects the container and locates its TIFF payload
    ///
    /// The stream position afterwards is unspecified; callers seek before
    /// reading the payload.
    pub fn sniff(reader: &mut dyn SeekableReader) -> ExifResult<Self> {
        let kind = detect_container(reader)?;
        let payload = match kind {
            ContainerKind::Tiff => TiffPayload { offset: 0, length: reader.total_len()? },
            ContainerKind::Jpeg => locate_exif_payload(reader)?,
        };

        debug!("Detected {} container, TIFF payload at {} ({} bytes)", kind, payload.offset, payload.length);
        Ok(Container { kind, payload })
    }
}

/// Peeks the first two bytes to identify the container
///
/// The stream position is restored to where it was before the call.
pub fn detect_container(reader: &mut dyn SeekableReader) -> ExifResult<ContainerKind> {
    let start = reader.stream_position()?;
    reader.seek(SeekFrom::Start(0))?;
    let mut magic = [0u8; 2];
    let read = reader.read_exact(&mut magic);
    reader.seek(SeekFrom::Start(start))?;
    read.map_err(|_| ExifError::UnrecognizedFormat(magic))?;

    match magic {
        [jpeg::MARKER_PREFIX, jpeg::SOI] => Ok(ContainerKind::Jpeg),
        header::LITTLE_ENDIAN_MARKER | header::BIG_ENDIAN_MARKER => Ok(ContainerKind::Tiff),
        _ => Err(ExifError::UnrecognizedFormat(magic)),
    }
}

/// Scans JPEG segments for the APP1 Exif payload
///
/// Walks the length-prefixed segments after SOI until an APP1 segment whose
/// payload starts with `Exif\0\0`. Reaching EOI or SOS first means the file
/// carries no Exif metadata.
pub fn locate_exif_payload(reader: &mut dyn SeekableReader) -> ExifResult<TiffPayload> {
    reader.seek(SeekFrom::Start(0))?;
    if read_marker(reader)? != jpeg::SOI {
        return Err(ExifError::InvalidJpeg("first segment must be SOI".to_string()));
    }

    loop {
        let marker = read_marker(reader)?;
        match marker {
            jpeg::EOI | jpeg::SOS => {
                debug!("Reached marker {:#04x} without an Exif segment", marker);
                return Err(ExifError::NoEmbeddedMetadata);
            }
            jpeg::SOI | jpeg::TEM | jpeg::RST0..=jpeg::RST7 => continue,
            _ => {}
        }

        let length = reader.read_u16::<BigEndian>()?;
        if length < 2 {
            return Err(ExifError::InvalidJpeg(format!("segment {:#04x} has length {}", marker, length)));
        }
        let data_len = (length - 2) as u64;
        let data_start = reader.stream_position()?;
        trace!("Segment {:#04x} at {} ({} bytes)", marker, data_start, data_len);

        if marker == jpeg::APP1 && data_len >= jpeg::EXIF_SIGNATURE.len() as u64 {
            let mut signature = [0u8; 6];
            reader.read_exact(&mut signature)?;
            if signature == jpeg::EXIF_SIGNATURE {
                let signature_len = signature.len() as u64;
                return Ok(TiffPayload {
                    offset: data_start + signature_len,
                    length: data_len - signature_len,
                });
            }
            debug!("Skipping APP1 segment without Exif signature");
        }

        reader.seek(SeekFrom::Start(data_start + data_len))?;
    }
}

/// Reads one marker, skipping 0xFF fill bytes
fn read_marker(reader: &mut dyn SeekableReader) -> ExifResult<u8> {
    let prefix = reader.read_u8()?;
    if prefix != jpeg::MARKER_PREFIX {
        return Err(ExifError::InvalidJpeg(format!("invalid segment marker prefix {:#04x}", prefix)));
    }

    let mut marker = reader.read_u8()?;
    while marker == jpeg::MARKER_PREFIX {
        marker = reader.read_u8()?;
    }
    Ok(marker)
}
