//! Offset and length validation
//!
//! Every offset and length taken from the stream is checked here before it
//! is used to seek or to size an allocation.

use log::debug;

use crate::tiff::constants::header;
use crate::tiff::errors::{ExifError, ExifResult};

/// Validates an IFD offset read from the header or a pointer tag
///
/// No directory can start inside the 8 header bytes.
pub fn validate_ifd_offset(offset: u32) -> ExifResult<()> {
    if offset < header::HEADER_SIZE {
        return Err(ExifError::InvalidIfdOffset(offset));
    }

    Ok(())
}

/// Validates that `length` bytes starting at `offset` lie inside the stream
///
/// # Arguments
/// * `offset` - Start of the byte range
/// * `length` - Number of bytes in the range
/// * `stream_len` - Total length of the stream
pub fn validate_range(offset: u64, length: u64, stream_len: u64) -> ExifResult<()> {
    let end = offset.checked_add(length);
    if offset >= stream_len || end.map_or(true, |end| end > stream_len) {
        debug!("Rejecting range {}+{} (stream size: {})", offset, length, stream_len);
        return Err(ExifError::OffsetOutOfRange { offset, length, stream_len });
    }

    Ok(())
}

/// Validates a tag value's size against the configured limit
pub fn validate_value_size(tag: u16, length: u64, limit: u64) -> ExifResult<()> {
    if length > limit {
        return Err(ExifError::ValueTooLarge { tag, length, limit });
    }

    Ok(())
}
