//! IFD reader implementation
//!
//! Reads one Image File Directory at a given offset: the entry count, the
//! entry block and the next-IFD offset, then resolves and decodes every
//! entry's value. Uses the Strategy pattern to handle both byte orders.
//!
//! The reader does not track visited offsets; cycle detection across
//! directories belongs to the caller.

use log::{debug, trace};
use std::io::SeekFrom;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::ifd::{ENTRY_COUNT_SIZE, ENTRY_SIZE};
use crate::tiff::constants::limits;
use crate::tiff::decoder;
use crate::tiff::dictionary::TagDictionary;
use crate::tiff::errors::ExifResult;
use crate::tiff::ifd::{Ifd, IfdEntry, TagRecord, ValueLocation};
use crate::tiff::validation;

/// Reader for single IFDs of one TIFF stream
pub struct IfdReader {
    /// Byte order of the stream
    byte_order: ByteOrder,
    /// Handler matching `byte_order`
    handler: Box<dyn ByteOrderHandler>,
    /// Length of the TIFF stream, for range checks
    stream_len: u64,
    /// Largest value a single tag may declare
    max_value_bytes: u64,
}

impl IfdReader {
    /// Creates a reader for a stream of `stream_len` bytes
    pub fn new(byte_order: ByteOrder, stream_len: u64) -> Self {
        IfdReader {
            byte_order,
            handler: byte_order.create_handler(),
            stream_len,
            max_value_bytes: limits::DEFAULT_MAX_VALUE_BYTES,
        }
    }

    /// Sets the largest value size accepted for one tag
    pub fn with_max_value_bytes(mut self, max_value_bytes: u64) -> Self {
        self.max_value_bytes = max_value_bytes;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn stream_len(&self) -> u64 {
        self.stream_len
    }

    /// Reads the IFD that starts at `offset`
    ///
    /// # Arguments
    /// * `reader` - The seekable reader positioned anywhere in the TIFF stream
    /// * `offset` - Offset of the IFD from the TIFF header
    /// * `dictionary` - Names for the tags of this directory kind
    ///
    /// # Returns
    /// The IFD with every entry resolved and decoded
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u32, dictionary: &TagDictionary) -> ExifResult<Ifd> {
        validation::validate_range(offset as u64, ENTRY_COUNT_SIZE, self.stream_len)?;
        reader.seek(SeekFrom::Start(offset as u64))?;

        let entry_count = self.handler.read_u16(reader)?;
        debug!("IFD at offset {} has {} entries", offset, entry_count);

        let mut block = vec![0u8; ENTRY_SIZE * entry_count as usize];
        reader.read_exact(&mut block)?;
        let next_offset = self.handler.read_u32(reader)?;
        debug!("Next IFD offset: {}", next_offset);

        let records: Vec<TagRecord> = block
            .chunks_exact(ENTRY_SIZE)
            .map(|chunk| {
                let mut slot = [0u8; ENTRY_SIZE];
                slot.copy_from_slice(chunk);
                TagRecord::parse(&slot, self.byte_order)
            })
            .collect();

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let name = dictionary.tag_name(record.id);
            let value = self
                .resolve_value(reader, &record)
                .and_then(|raw| decoder::decode(&raw, record.field_type, record.count, self.byte_order))
                .map_err(|e| e.in_stage(format!("tag {} ({})", record.id, name)))?;

            trace!("Tag {} ({}) = {}", record.id, name, value);
            entries.push(IfdEntry { record, name, value });
        }

        Ok(Ifd { offset, entry_count, entries, next_offset })
    }

    /// Returns the value bytes of a record, fetching indirect values
    ///
    /// The declared range is validated against the stream length and the
    /// size limit before the buffer is allocated.
    pub fn resolve_value(&self, reader: &mut dyn SeekableReader, record: &TagRecord) -> ExifResult<Vec<u8>> {
        match &record.location {
            ValueLocation::Inline(bytes) => Ok(bytes.clone()),
            ValueLocation::Offset(offset) => {
                let length = record.byte_length();
                validation::validate_value_size(record.id, length, self.max_value_bytes)?;
                validation::validate_range(*offset as u64, length, self.stream_len)?;

                reader.seek(SeekFrom::Start(*offset as u64))?;
                let mut buffer = vec![0u8; length as usize];
                reader.read_exact(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}
