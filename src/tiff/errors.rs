//! Custom error types for Exif/TIFF decoding

use std::fmt;
use std::io;

/// Coarse classification of an [`ExifError`]
///
/// Callers that only need to know *what kind* of failure happened (bad
/// signature vs. truncated data vs. a loop in the directory structure) match
/// on this instead of on the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad magic, version, signature or container format
    Format,
    /// The stream or a value buffer ended before the declared length
    Truncated,
    /// A declared offset/length points outside the stream or exceeds a limit
    OffsetOutOfRange,
    /// A field type code outside the twelve TIFF 6.0 types
    UnsupportedFieldType,
    /// A directory or pointer refers back to an already visited directory
    StructuralCycle,
    /// Any other I/O failure
    Io,
    /// Everything else (dictionary loading, CLI arguments, ...)
    Other,
}

/// Exif/TIFF specific error types
#[derive(Debug)]
pub enum ExifError {
    /// I/O error
    IoError(io::Error),
    /// The stream ended while reading
    TruncatedStream(String),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// IFD0 offset pointing inside the 8-byte header
    InvalidIfdOffset(u32),
    /// First two bytes match neither JPEG nor TIFF
    UnrecognizedFormat([u8; 2]),
    /// Malformed JPEG segment structure
    InvalidJpeg(String),
    /// JPEG stream without an APP1 Exif segment before EOI/SOS
    NoEmbeddedMetadata,
    /// Offset (plus length) exceeding the stream size
    OffsetOutOfRange { offset: u64, length: u64, stream_len: u64 },
    /// Value larger than the configured maximum
    ValueTooLarge { tag: u16, length: u64, limit: u64 },
    /// Raw value buffer shorter than `width * count`
    ShortValue { needed: u64, available: usize },
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Directory offset visited twice
    StructuralCycle(u32),
    /// Tag dictionary could not be loaded
    InvalidTagDictionary(String),
    /// An error annotated with the parse stage where it happened
    Context { stage: String, source: Box<ExifError> },
    /// Generic error with message
    GenericError(String),
}

impl ExifError {
    /// Classifies this error, looking through any stage context
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExifError::IoError(_) => ErrorKind::Io,
            ExifError::TruncatedStream(_) | ExifError::ShortValue { .. } => ErrorKind::Truncated,
            ExifError::InvalidByteOrder(_)
            | ExifError::UnsupportedVersion(_)
            | ExifError::InvalidIfdOffset(_)
            | ExifError::UnrecognizedFormat(_)
            | ExifError::InvalidJpeg(_)
            | ExifError::NoEmbeddedMetadata => ErrorKind::Format,
            ExifError::OffsetOutOfRange { .. } | ExifError::ValueTooLarge { .. } => ErrorKind::OffsetOutOfRange,
            ExifError::UnsupportedFieldType(_) => ErrorKind::UnsupportedFieldType,
            ExifError::StructuralCycle(_) => ErrorKind::StructuralCycle,
            ExifError::Context { source, .. } => source.kind(),
            ExifError::InvalidTagDictionary(_) | ExifError::GenericError(_) => ErrorKind::Other,
        }
    }

    /// Returns the innermost error, skipping stage annotations
    pub fn root_cause(&self) -> &ExifError {
        match self {
            ExifError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Wraps this error with the name of the stage that failed
    pub fn in_stage(self, stage: impl Into<String>) -> Self {
        ExifError::Context { stage: stage.into(), source: Box::new(self) }
    }
}

impl fmt::Display for ExifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifError::IoError(e) => write!(f, "I/O error: {}", e),
            ExifError::TruncatedStream(msg) => write!(f, "Truncated stream: {}", msg),
            ExifError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            ExifError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            ExifError::InvalidIfdOffset(o) => write!(f, "Invalid IFD offset: {} (offset inside header)", o),
            ExifError::UnrecognizedFormat(b) => {
                write!(f, "Unrecognized format (leading bytes {:02x} {:02x})", b[0], b[1])
            }
            ExifError::InvalidJpeg(msg) => write!(f, "Invalid JPEG: {}", msg),
            ExifError::NoEmbeddedMetadata => write!(f, "No embedded metadata found"),
            ExifError::OffsetOutOfRange { offset, length, stream_len } => write!(
                f,
                "Offset out of range: {} bytes at offset {} (stream size: {})",
                length, offset, stream_len
            ),
            ExifError::ValueTooLarge { tag, length, limit } => {
                write!(f, "Value of tag {} is {} bytes, limit is {}", tag, length, limit)
            }
            ExifError::ShortValue { needed, available } => {
                write!(f, "Value too short: need {} bytes, have {}", needed, available)
            }
            ExifError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            ExifError::StructuralCycle(o) => write!(f, "Recursive IFD structure at offset {}", o),
            ExifError::InvalidTagDictionary(msg) => write!(f, "Invalid tag dictionary: {}", msg),
            ExifError::Context { stage, source } => write!(f, "{}: {}", stage, source),
            ExifError::GenericError(msg) => write!(f, "Exif error: {}", msg),
        }
    }
}

impl std::error::Error for ExifError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExifError::IoError(e) => Some(e),
            ExifError::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for ExifError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            ExifError::TruncatedStream(error.to_string())
        } else {
            ExifError::IoError(error)
        }
    }
}

/// Result type for Exif operations
pub type ExifResult<T> = Result<T, ExifError>;

impl From<String> for ExifError {
    fn from(msg: String) -> Self {
        ExifError::GenericError(msg)
    }
}
