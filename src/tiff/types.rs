//! TIFF field (scalar) types

use std::fmt;
use crate::tiff::constants::field_types;

/// The scalar type of a directory entry's value items
///
/// Covers the twelve field types of TIFF 6.0. Any other code is kept as
/// `Unknown` so that a directory with vendor-specific types still parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    /// Field type code outside the TIFF 6.0 table
    Unknown(u16),
}

impl ScalarType {
    /// Maps a raw field type code to a scalar type
    pub fn from_code(code: u16) -> Self {
        match code {
            field_types::BYTE => ScalarType::Byte,
            field_types::ASCII => ScalarType::Ascii,
            field_types::SHORT => ScalarType::Short,
            field_types::LONG => ScalarType::Long,
            field_types::RATIONAL => ScalarType::Rational,
            field_types::SBYTE => ScalarType::SByte,
            field_types::UNDEFINED => ScalarType::Undefined,
            field_types::SSHORT => ScalarType::SShort,
            field_types::SLONG => ScalarType::SLong,
            field_types::SRATIONAL => ScalarType::SRational,
            field_types::FLOAT => ScalarType::Float,
            field_types::DOUBLE => ScalarType::Double,
            other => ScalarType::Unknown(other),
        }
    }

    /// Returns the raw field type code
    pub fn code(&self) -> u16 {
        match self {
            ScalarType::Byte => field_types::BYTE,
            ScalarType::Ascii => field_types::ASCII,
            ScalarType::Short => field_types::SHORT,
            ScalarType::Long => field_types::LONG,
            ScalarType::Rational => field_types::RATIONAL,
            ScalarType::SByte => field_types::SBYTE,
            ScalarType::Undefined => field_types::UNDEFINED,
            ScalarType::SShort => field_types::SSHORT,
            ScalarType::SLong => field_types::SLONG,
            ScalarType::SRational => field_types::SRATIONAL,
            ScalarType::Float => field_types::FLOAT,
            ScalarType::Double => field_types::DOUBLE,
            ScalarType::Unknown(code) => *code,
        }
    }

    /// Size in bytes of one item of this type, 0 for unknown types
    pub fn width(&self) -> u32 {
        match self {
            ScalarType::Byte | ScalarType::Ascii | ScalarType::SByte | ScalarType::Undefined => 1,
            ScalarType::Short | ScalarType::SShort => 2,
            ScalarType::Long | ScalarType::SLong | ScalarType::Float => 4,
            ScalarType::Rational | ScalarType::SRational | ScalarType::Double => 8,
            ScalarType::Unknown(_) => 0,
        }
    }

    /// Byte length of `count` items, computed without overflow
    pub fn byte_length(&self, count: u32) -> u64 {
        self.width() as u64 * count as u64
    }

    /// Whether this type is one of the TIFF 6.0 types
    pub fn is_known(&self) -> bool {
        !matches!(self, ScalarType::Unknown(_))
    }

    /// Upper-case TIFF name of this type
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Byte => "BYTE",
            ScalarType::Ascii => "ASCII",
            ScalarType::Short => "SHORT",
            ScalarType::Long => "LONG",
            ScalarType::Rational => "RATIONAL",
            ScalarType::SByte => "SBYTE",
            ScalarType::Undefined => "UNDEFINED",
            ScalarType::SShort => "SSHORT",
            ScalarType::SLong => "SLONG",
            ScalarType::SRational => "SRATIONAL",
            ScalarType::Float => "FLOAT",
            ScalarType::Double => "DOUBLE",
            ScalarType::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Unknown(code) => write!(f, "UNKNOWN({})", code),
            known => f.write_str(known.name()),
        }
    }
}
