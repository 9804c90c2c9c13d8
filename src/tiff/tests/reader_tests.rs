//! Tests for the IFD reader

use std::io::Cursor;

use crate::io::byte_order::ByteOrder;
use crate::tiff::dictionary::{TagDictionary, TagDictionarySet};
use crate::tiff::errors::{ErrorKind, ExifError};
use crate::tiff::reader::IfdReader;
use crate::tiff::tests::test_utils::{create_test_tiff_buffer, Entry, TiffBuilder};
use crate::tiff::value::DecodedValue;

fn reader_for(cursor: &Cursor<Vec<u8>>, byte_order: ByteOrder) -> IfdReader {
    IfdReader::new(byte_order, cursor.get_ref().len() as u64)
}

#[test]
fn test_read_simple_ifd() {
    let mut cursor = create_test_tiff_buffer();
    let reader = reader_for(&cursor, ByteOrder::LittleEndian);

    let ifd = reader.read_ifd(&mut cursor, 8, &TagDictionarySet::standard().ifd0).unwrap();

    assert_eq!(ifd.offset, 8);
    assert_eq!(ifd.entry_count, 2);
    assert_eq!(ifd.next_offset, 0);
    assert!(!ifd.has_next());
    assert_eq!(ifd.get_value(256), Some(&DecodedValue::Int(vec![800])));
    assert_eq!(ifd.get_entry(257).map(|e| e.name.as_str()), Some("ImageLength"));
}

#[test]
fn test_indirect_values_both_orders() {
    for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let mut builder = TiffBuilder::new(byte_order);
        builder.write_ifd(
            &[
                Entry::ascii(271, "Canon"),
                Entry::rational(282, &[(72, 1)]),
                Entry::short(258, &[8, 8, 8]),
            ],
            0,
        );
        let mut cursor = builder.cursor();
        let reader = reader_for(&cursor, byte_order);

        let ifd = reader.read_ifd(&mut cursor, 8, &TagDictionarySet::standard().ifd0).unwrap();

        assert_eq!(ifd.get_value(271), Some(&DecodedValue::Text("Canon".to_string())));
        assert_eq!(ifd.get_value(282), Some(&DecodedValue::Rational(vec![(72, 1)])));
        assert_eq!(ifd.get_value(258), Some(&DecodedValue::Int(vec![8, 8, 8])));
    }
}

#[test]
fn test_empty_ifd() {
    let mut builder = TiffBuilder::big_endian();
    builder.write_ifd(&[], 0);
    let mut cursor = builder.cursor();
    let reader = reader_for(&cursor, ByteOrder::BigEndian);

    let ifd = reader.read_ifd(&mut cursor, 8, &TagDictionary::new()).unwrap();

    assert_eq!(ifd.entry_count, 0);
    assert!(ifd.entries.is_empty());
}

#[test]
fn test_unknown_tag_gets_placeholder_name() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::short(0xC0DE, &[1])], 0);
    let mut cursor = builder.cursor();
    let reader = reader_for(&cursor, ByteOrder::LittleEndian);

    let ifd = reader.read_ifd(&mut cursor, 8, &TagDictionary::new()).unwrap();

    assert_eq!(ifd.entries[0].name, "Unknown-0xc0de");
}

#[test]
fn test_ifd_offset_past_end() {
    let mut cursor = create_test_tiff_buffer();
    let reader = reader_for(&cursor, ByteOrder::LittleEndian);

    let err = reader.read_ifd(&mut cursor, 4096, &TagDictionary::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
}

#[test]
fn test_truncated_entry_block() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::long(256, &[1]), Entry::long(257, &[1])], 0);
    let mut bytes = builder.bytes();
    bytes.truncate(8 + 2 + 12);
    let mut cursor = Cursor::new(bytes);
    let reader = reader_for(&cursor, ByteOrder::LittleEndian);

    let err = reader.read_ifd(&mut cursor, 8, &TagDictionary::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn test_value_offset_past_end_is_rejected() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::at_offset(271, 2, 64, 0x1000)], 0);
    let mut cursor = builder.cursor();
    let reader = reader_for(&cursor, ByteOrder::LittleEndian);

    let err = reader.read_ifd(&mut cursor, 8, &TagDictionary::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
    assert!(matches!(err.root_cause(), ExifError::OffsetOutOfRange { offset: 0x1000, length: 64, .. }));
}

#[test]
fn test_huge_count_is_rejected_before_allocation() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::at_offset(273, 4, u32::MAX, 8)], 0);
    let mut cursor = builder.cursor();
    let reader = reader_for(&cursor, ByteOrder::LittleEndian).with_max_value_bytes(1024);

    let err = reader.read_ifd(&mut cursor, 8, &TagDictionary::new()).unwrap_err();

    assert!(matches!(err.root_cause(), ExifError::ValueTooLarge { tag: 273, .. }));
}

#[test]
fn test_ifd_display_lists_entries() {
    let mut cursor = create_test_tiff_buffer();
    let reader = reader_for(&cursor, ByteOrder::LittleEndian);

    let ifd = reader.read_ifd(&mut cursor, 8, &TagDictionarySet::standard().ifd0).unwrap();
    let text = ifd.to_string();

    assert!(text.contains("Number of entries: 2"));
    assert!(text.contains("256 (ImageWidth): 800"));
}
