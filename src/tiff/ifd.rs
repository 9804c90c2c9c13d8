//! Image File Directory (IFD) structures
//!
//! An IFD is a 2-byte entry count, followed by that many 12-byte entries,
//! followed by the 4-byte offset of the next IFD (0 if none). Each entry
//! describes one tag: its id, scalar type, item count and either the value
//! itself (when it fits in 4 bytes) or the offset where the value lives.

use std::fmt;
use log::trace;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::ifd::{ENTRY_SIZE, INLINE_VALUE_SIZE};
use crate::tiff::types::ScalarType;
use crate::tiff::value::DecodedValue;

/// Where the value bytes of a directory entry are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueLocation {
    /// Value stored in the entry itself, left-justified in the 4-byte slot
    Inline(Vec<u8>),
    /// Absolute offset (from the TIFF header) of the value bytes
    Offset(u32),
}

/// One 12-byte directory entry, before value resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Tag identifier
    pub id: u16,
    /// Scalar type of the value items
    pub field_type: ScalarType,
    /// Number of value items (not bytes)
    pub count: u32,
    /// Inline bytes or value offset
    pub location: ValueLocation,
}

impl TagRecord {
    /// Parses one directory entry
    ///
    /// Pure: indirect values are only located here, the IFD reader fetches
    /// them. Unknown field types have no width, so their whole value slot is
    /// kept inline as opaque bytes and `count` is not used for sizing.
    pub fn parse(slot: &[u8; ENTRY_SIZE], byte_order: ByteOrder) -> Self {
        let id = byte_order.u16_from(&slot[0..2]);
        let field_type = ScalarType::from_code(byte_order.u16_from(&slot[2..4]));
        let count = byte_order.u32_from(&slot[4..8]);
        let value_slot = &slot[8..12];

        let location = if !field_type.is_known() {
            ValueLocation::Inline(value_slot.to_vec())
        } else {
            let length = field_type.byte_length(count);
            if length <= INLINE_VALUE_SIZE {
                ValueLocation::Inline(value_slot[..length as usize].to_vec())
            } else {
                ValueLocation::Offset(byte_order.u32_from(value_slot))
            }
        };

        trace!("Parsed entry: tag={}, type={}, count={}, location={:?}", id, field_type, count, location);

        TagRecord { id, field_type, count, location }
    }

    /// Byte length of the value (`width * count`)
    pub fn byte_length(&self) -> u64 {
        self.field_type.byte_length(self.count)
    }

    /// Determines if the value is stored inline rather than at an offset
    pub fn is_value_inline(&self) -> bool {
        matches!(self.location, ValueLocation::Inline(_))
    }
}

/// A directory entry with its name and decoded value
#[derive(Debug, Clone, PartialEq)]
pub struct IfdEntry {
    pub record: TagRecord,
    /// Name from the directory's tag dictionary, or a placeholder
    pub name: String,
    pub value: DecodedValue,
}

impl IfdEntry {
    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!(
            "Tag: {} ({}), Type: {}, Count: {}, Value: {}",
            self.record.id, self.name, self.record.field_type, self.record.count, self.value
        )
    }
}

/// Represents one Image File Directory
#[derive(Debug, Clone, PartialEq)]
pub struct Ifd {
    /// Offset of this IFD from the TIFF header
    pub offset: u32,
    /// Entry count as declared in the stream
    pub entry_count: u16,
    /// Entries in file order
    pub entries: Vec<IfdEntry>,
    /// Offset of the next IFD, 0 for the last one
    pub next_offset: u32,
}

impl Ifd {
    /// Gets the first entry for a tag id
    pub fn get_entry(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|entry| entry.record.id == tag)
    }

    /// Gets the decoded value of the first entry for a tag id
    pub fn get_value(&self, tag: u16) -> Option<&DecodedValue> {
        self.get_entry(tag).map(|entry| &entry.value)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.get_entry(tag).is_some()
    }

    /// Whether another IFD follows this one
    pub fn has_next(&self) -> bool {
        self.next_offset != 0
    }
}

impl fmt::Display for Ifd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD (offset: {})", self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entry_count)?;
        writeln!(f, "  Next IFD offset: {}", self.next_offset)?;
        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            let location = match entry.record.location {
                ValueLocation::Inline(_) => "inline".to_string(),
                ValueLocation::Offset(offset) => format!("@{}", offset),
            };
            writeln!(
                f,
                "    {} ({}): {} [{} x{}, {}]",
                entry.record.id, entry.name, entry.value, entry.record.field_type, entry.record.count, location
            )?;
        }

        Ok(())
    }
}
