//! TIFF, Exif and JPEG format constants
//!
//! This module defines constants used throughout the decoding code,
//! replacing magic numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

    /// Size of the Image File Header; IFD0 can not start before this
    pub const HEADER_SIZE: u32 = 8;
}

/// IFD layout constants
pub mod ifd {
    /// Size of the entry count field
    pub const ENTRY_COUNT_SIZE: u64 = 2;

    /// Size of one directory entry
    pub const ENTRY_SIZE: usize = 12;

    /// Bytes available for an inline value
    pub const INLINE_VALUE_SIZE: u64 = 4;
}

/// Field types as defined by TIFF 6.0
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
}

/// Tags with special meaning to the directory walker
pub mod tags {
    /// Pointer from IFD0 to the Exif sub-IFD
    pub const EXIF_IFD_POINTER: u16 = 34665;
    /// Pointer from IFD0 to the GPS sub-IFD
    pub const GPS_IFD_POINTER: u16 = 34853;
    /// Pointer from the Exif sub-IFD to the Interoperability sub-IFD
    pub const INTEROP_IFD_POINTER: u16 = 40965;
}

/// JPEG segment markers (second byte, after 0xFF)
pub mod jpeg {
    pub const MARKER_PREFIX: u8 = 0xFF;
    pub const SOI: u8 = 0xD8;
    pub const EOI: u8 = 0xD9;
    pub const SOS: u8 = 0xDA;
    pub const APP1: u8 = 0xE1;
    pub const TEM: u8 = 0x01;
    pub const RST0: u8 = 0xD0;
    pub const RST7: u8 = 0xD7;

    /// Prefix of an APP1 payload carrying an embedded TIFF stream
    pub const EXIF_SIGNATURE: [u8; 6] = *b"Exif\0\0";
}

/// Decoding limits
pub mod limits {
    /// Default upper bound for one tag's value
    pub const DEFAULT_MAX_VALUE_BYTES: u64 = 16 * 1024 * 1024;

    /// Bytes of an opaque value shown by the display form
    pub const RAW_PREVIEW_BYTES: usize = 32;
}
