//! Decoded tag values

use std::fmt;

use crate::utils::format_utils;

/// A decoded tag value
///
/// One variant per family of TIFF field types. Every value is a sequence
/// because every TIFF field carries a count, even when it is 1.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// BYTE, SHORT, LONG and their signed variants, sign-extended
    Int(Vec<i64>),
    /// RATIONAL and SRATIONAL as (numerator, denominator) pairs
    Rational(Vec<(i64, i64)>),
    /// FLOAT and DOUBLE
    Float(Vec<f64>),
    /// ASCII without the NUL terminator
    Text(String),
    /// UNDEFINED and unknown field types, bytes kept verbatim
    Raw(Vec<u8>),
}

impl DecodedValue {
    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            DecodedValue::Int(values) => Some(values),
            _ => None,
        }
    }

    /// First integer of an integer sequence
    pub fn as_integer(&self) -> Option<i64> {
        self.as_integers().and_then(|values| values.first().copied())
    }

    pub fn as_rationals(&self) -> Option<&[(i64, i64)]> {
        match self {
            DecodedValue::Rational(values) => Some(values),
            _ => None,
        }
    }

    /// First pair of a rational sequence
    pub fn as_rational(&self) -> Option<(i64, i64)> {
        self.as_rationals().and_then(|values| values.first().copied())
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            DecodedValue::Float(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Interprets the value as a sub-IFD offset.
    ///
    /// Only a single non-negative integer that fits in 32 bits is accepted.
    pub fn as_offset(&self) -> Option<u32> {
        match self {
            DecodedValue::Int(values) if values.len() == 1 => u32::try_from(values[0]).ok(),
            _ => None,
        }
    }

    /// Number of items in the value (characters for text)
    pub fn len(&self) -> usize {
        match self {
            DecodedValue::Int(values) => values.len(),
            DecodedValue::Rational(values) => values.len(),
            DecodedValue::Float(values) => values.len(),
            DecodedValue::Text(text) => text.len(),
            DecodedValue::Raw(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the variant, used by the CLI listing
    pub fn kind_name(&self) -> &'static str {
        match self {
            DecodedValue::Int(_) => "int",
            DecodedValue::Rational(_) => "rational",
            DecodedValue::Float(_) => "float",
            DecodedValue::Text(_) => "text",
            DecodedValue::Raw(_) => "raw",
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Int(values) => f.write_str(&format_utils::join(values.iter())),
            DecodedValue::Rational(values) => f.write_str(&format_utils::join(
                values.iter().map(|(n, d)| format!("{}/{}", n, d)),
            )),
            DecodedValue::Float(values) => f.write_str(&format_utils::join(values.iter())),
            DecodedValue::Text(text) => f.write_str(text),
            DecodedValue::Raw(bytes) => f.write_str(&format_utils::raw_preview(bytes)),
        }
    }
}
