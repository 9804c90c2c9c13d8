//! Primitive value decoding
//!
//! Turns the raw bytes of one directory entry into a [`DecodedValue`],
//! honoring the stream's byte order. The byte buffer is always checked
//! against `width * count` before anything is read from it.

use std::io::Cursor;

use log::{trace, warn};

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::errors::{ExifError, ExifResult};
use crate::tiff::types::ScalarType;
use crate::tiff::value::DecodedValue;
use crate::utils::format_utils;

/// Decodes `count` items of `field_type` from `raw`
///
/// # Arguments
/// * `raw` - The value bytes, inline or fetched from the value offset
/// * `field_type` - The declared scalar type
/// * `count` - Number of items (not bytes)
/// * `byte_order` - Byte order of the enclosing TIFF stream
///
/// # Returns
/// The decoded value, or `ShortValue` if `raw` holds fewer bytes than declared
pub fn decode(raw: &[u8], field_type: ScalarType, count: u32, byte_order: ByteOrder) -> ExifResult<DecodedValue> {
    let needed = field_type.byte_length(count);
    if (raw.len() as u64) < needed {
        return Err(ExifError::ShortValue { needed, available: raw.len() });
    }

    let handler = byte_order.create_handler();
    let mut cursor = Cursor::new(raw);
    let n = count as usize;

    let value = match field_type {
        ScalarType::Byte => DecodedValue::Int(raw[..n].iter().map(|&b| b as i64).collect()),
        ScalarType::SByte => DecodedValue::Int(raw[..n].iter().map(|&b| b as i8 as i64).collect()),
        ScalarType::Short => read_ints(n, |c| handler.read_u16(c).map(i64::from), &mut cursor)?,
        ScalarType::SShort => read_ints(n, |c| handler.read_i16(c).map(i64::from), &mut cursor)?,
        ScalarType::Long => read_ints(n, |c| handler.read_u32(c).map(i64::from), &mut cursor)?,
        ScalarType::SLong => read_ints(n, |c| handler.read_i32(c).map(i64::from), &mut cursor)?,
        ScalarType::Rational => read_rationals(n, handler.as_ref(), false, &mut cursor)?,
        ScalarType::SRational => read_rationals(n, handler.as_ref(), true, &mut cursor)?,
        ScalarType::Float => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                values.push(handler.read_f32(&mut cursor)? as f64);
            }
            DecodedValue::Float(values)
        }
        ScalarType::Double => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                values.push(handler.read_f64(&mut cursor)?);
            }
            DecodedValue::Float(values)
        }
        ScalarType::Ascii => DecodedValue::Text(decode_ascii(&raw[..n])),
        ScalarType::Undefined => DecodedValue::Raw(raw[..n].to_vec()),
        ScalarType::Unknown(code) => {
            warn!("{}, keeping {} raw bytes", ExifError::UnsupportedFieldType(code), raw.len());
            DecodedValue::Raw(raw.to_vec())
        }
    };

    trace!("Decoded {} x{} as {}", field_type, count, value.kind_name());
    Ok(value)
}

/// ASCII payload without its terminator
///
/// The last of the `count` bytes is the NUL terminator by convention and is
/// dropped unconditionally; extra NUL padding before it is trimmed as well.
pub fn decode_ascii(bytes: &[u8]) -> String {
    let Some((_, text)) = bytes.split_last() else {
        return String::new();
    };
    String::from_utf8_lossy(format_utils::trim_trailing_nulls(text)).into_owned()
}

fn read_ints<F>(count: usize, mut read_one: F, cursor: &mut Cursor<&[u8]>) -> ExifResult<DecodedValue>
where
    F: FnMut(&mut Cursor<&[u8]>) -> std::io::Result<i64>,
{
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_one(cursor)?);
    }
    Ok(DecodedValue::Int(values))
}

fn read_rationals(
    count: usize,
    handler: &dyn ByteOrderHandler,
    signed: bool,
    cursor: &mut Cursor<&[u8]>,
) -> ExifResult<DecodedValue> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let pair = if signed {
            let (n, d) = handler.read_srational(cursor)?;
            (n as i64, d as i64)
        } else {
            let (n, d) = handler.read_rational(cursor)?;
            (n as i64, d as i64)
        };
        values.push(pair);
    }
    Ok(DecodedValue::Rational(values))
}
