//! Tests for the directory walker

use std::io::Cursor;

use crate::exif::container::ContainerKind;
use crate::exif::walker::{ExifReader, SubIfdPolicy};
use crate::io::byte_order::ByteOrder;
use crate::tiff::dictionary::{Namespace, TagDictionarySet};
use crate::tiff::errors::{ErrorKind, ExifError};
use crate::tiff::tests::test_utils::{exif_app1, jpeg_with_segments, Entry, TiffBuilder};
use crate::tiff::value::DecodedValue;

const EXIF_POINTER: u16 = 34665;
const GPS_POINTER: u16 = 34853;
const INTEROP_POINTER: u16 = 40965;

/// IFD0 with Make and Model, an Exif sub-IFD with an Interop sub-IFD, and a GPS sub-IFD
fn camera_tiff(byte_order: ByteOrder) -> TiffBuilder {
    let mut builder = TiffBuilder::new(byte_order);
    let interop = builder.write_ifd(&[Entry::ascii(1, "R98"), Entry::undefined(2, b"0100")], 0);
    let exif = builder.write_ifd(
        &[
            Entry::rational(33434, &[(1, 250)]),
            Entry::undefined(36864, b"0231"),
            Entry::long(INTEROP_POINTER, &[interop]),
        ],
        0,
    );
    let gps = builder.write_ifd(
        &[
            Entry::byte(0, &[2, 3, 0, 0]),
            Entry::ascii(1, "N"),
            Entry::rational(2, &[(52, 1), (30, 1), (0, 1)]),
        ],
        0,
    );
    let ifd0 = builder.write_ifd(
        &[
            Entry::ascii(271, "Canon"),
            Entry::ascii(272, "EOS"),
            Entry::short(274, &[1]),
            Entry::long(EXIF_POINTER, &[exif]),
            Entry::long(GPS_POINTER, &[gps]),
        ],
        0,
    );
    builder.set_ifd0_offset(ifd0);
    builder
}

#[test]
fn test_minimal_tiff() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::long(257, &[1])], 0);

    let document = ExifReader::new().parse(&mut builder.cursor()).unwrap();

    assert_eq!(document.container(), ContainerKind::Tiff);
    assert_eq!(document.byte_order(), ByteOrder::LittleEndian);
    assert_eq!(document.ifd0().len(), 1);
    assert_eq!(document.get(Namespace::Ifd0, "ImageLength"), Some(&DecodedValue::Int(vec![1])));
    assert!(document.exif().is_empty());
    assert!(document.gps().is_empty());
    assert!(document.degraded().is_empty());
    assert_eq!(document.namespaces(), vec![Namespace::Ifd0]);
}

#[test]
fn test_sub_ifds_are_followed() {
    for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let document = ExifReader::new().parse(&mut camera_tiff(byte_order).cursor()).unwrap();

        assert_eq!(document.ifd0()["Make"], DecodedValue::Text("Canon".to_string()));
        assert_eq!(document.exif()["ExposureTime"], DecodedValue::Rational(vec![(1, 250)]));
        assert_eq!(document.exif()["ExifVersion"], DecodedValue::Raw(b"0231".to_vec()));
        assert_eq!(document.gps()["GPSVersionID"], DecodedValue::Int(vec![2, 3, 0, 0]));
        assert_eq!(document.gps()["GPSLatitudeRef"], DecodedValue::Text("N".to_string()));
        assert_eq!(document.interop()["InteroperabilityIndex"], DecodedValue::Text("R98".to_string()));
        assert_eq!(document.namespaces(), Namespace::ALL.to_vec());
    }
}

#[test]
fn test_pointer_tags_stay_visible() {
    let document = ExifReader::new().parse(&mut camera_tiff(ByteOrder::LittleEndian).cursor()).unwrap();

    let pointer = document.ifd0().get_by_id(EXIF_POINTER).unwrap();
    assert_eq!(pointer.name, "ExifIFDPointer");
    assert!(pointer.value.as_offset().is_some());
}

#[test]
fn test_interop_can_be_disabled() {
    let reader = ExifReader::builder().follow_interop(false).build();
    let document = reader.parse(&mut camera_tiff(ByteOrder::BigEndian).cursor()).unwrap();

    assert!(!document.exif().is_empty());
    assert!(document.interop().is_empty());
}

#[test]
fn test_jpeg_container() {
    let tiff = camera_tiff(ByteOrder::BigEndian).bytes();
    let xmp = (0xE1, b"http://ns.adobe.com/xap/1.0/\0".to_vec());
    let jpeg = jpeg_with_segments(&[(0xE0, b"JFIF\0".to_vec()), xmp, exif_app1(&tiff)]);

    let document = ExifReader::new().parse(&mut Cursor::new(jpeg)).unwrap();

    assert_eq!(document.container(), ContainerKind::Jpeg);
    assert_eq!(document.byte_order(), ByteOrder::BigEndian);
    assert_eq!(document.ifd0()["Model"], DecodedValue::Text("EOS".to_string()));
    assert_eq!(document.gps().len(), 3);
}

#[test]
fn test_jpeg_without_exif() {
    let jpeg = jpeg_with_segments(&[(0xE0, b"JFIF\0".to_vec())]);
    let err = ExifReader::new().parse(&mut Cursor::new(jpeg)).unwrap_err();

    assert!(matches!(err.root_cause(), ExifError::NoEmbeddedMetadata));
}

#[test]
fn test_header_errors_are_format_errors() {
    let cases: [&[u8]; 3] = [
        b"II\x2a\x00\x04\x00\x00\x00",
        b"II\x2b\x00\x08\x00\x00\x00",
        b"MM\x00\x2a\x00\x00\x00\x02",
    ];
    for bytes in cases {
        let err = ExifReader::new().parse(&mut Cursor::new(bytes.to_vec())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format, "{}", err);
    }
}

#[test]
fn test_ifd0_self_loop() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::long(256, &[1])], 8);

    let err = ExifReader::new().parse(&mut builder.cursor()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StructuralCycle);
    assert!(matches!(err.root_cause(), ExifError::StructuralCycle(8)));
}

#[test]
fn test_ifd0_with_next_ifd_is_accepted() {
    let mut builder = TiffBuilder::little_endian();
    let ifd1 = builder.position() + 2 + 12 + 4;
    builder.write_ifd(&[Entry::long(256, &[1])], ifd1);
    builder.write_ifd(&[Entry::long(256, &[2])], 0);

    let document = ExifReader::new().parse(&mut builder.cursor()).unwrap();

    assert_eq!(document.ifd0()["ImageWidth"], DecodedValue::Int(vec![1]));
}

#[test]
fn test_sub_ifd_pointing_to_ifd0_is_a_cycle() {
    let mut builder = TiffBuilder::big_endian();
    builder.write_ifd(&[Entry::long(EXIF_POINTER, &[8])], 0);

    let err = ExifReader::new().parse(&mut builder.cursor()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StructuralCycle);
}

#[test]
fn test_interop_pointing_to_exif_is_a_cycle() {
    let mut builder = TiffBuilder::little_endian();
    let exif_offset = 8 + 2 + 12 + 4;
    builder.write_ifd(&[Entry::long(EXIF_POINTER, &[exif_offset])], 0);
    builder.write_ifd(&[Entry::long(INTEROP_POINTER, &[exif_offset])], 0);

    let err = ExifReader::builder()
        .sub_ifd_policy(SubIfdPolicy::Degrade)
        .build()
        .parse(&mut builder.cursor())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StructuralCycle);
}

#[test]
fn test_truncated_gps_degrades() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::ascii(271, "Nikon"), Entry::long(GPS_POINTER, &[0x4000])], 0);

    let document = ExifReader::new().parse(&mut builder.cursor()).unwrap();

    assert_eq!(document.ifd0()["Make"], DecodedValue::Text("Nikon".to_string()));
    assert!(document.gps().is_empty());
    assert!(document.is_degraded(Namespace::Gps));
    assert_eq!(document.degraded().len(), 1);
    assert!(document.degraded()[0].reason.contains("Offset out of range"));
}

#[test]
fn test_truncated_gps_fails_when_strict() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::long(GPS_POINTER, &[0x4000])], 0);

    let err = ExifReader::builder()
        .sub_ifd_policy(SubIfdPolicy::Strict)
        .build()
        .parse(&mut builder.cursor())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
    assert!(err.to_string().starts_with("gps sub-IFD"));
}

#[test]
fn test_non_integer_pointer_degrades() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::ascii(EXIF_POINTER, "nope")], 0);

    let document = ExifReader::new().parse(&mut builder.cursor()).unwrap();

    assert!(document.exif().is_empty());
    assert!(document.is_degraded(Namespace::Exif));
}

#[test]
fn test_ifd_typed_pointer_is_followed() {
    let mut builder = TiffBuilder::big_endian();
    let gps = builder.write_ifd(&[Entry::ascii(1, "S")], 0);
    let ifd0 = builder.write_ifd(&[Entry::slot(GPS_POINTER, 13, 1, gps.to_be_bytes())], 0);
    builder.set_ifd0_offset(ifd0);

    let document = ExifReader::new().parse(&mut builder.cursor()).unwrap();

    assert_eq!(document.gps()["GPSLatitudeRef"], DecodedValue::Text("S".to_string()));
}

#[test]
fn test_unknown_field_type_is_raw() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::slot(0x9999, 99, 3, [1, 2, 3, 4]), Entry::long(256, &[5])], 0);

    let document = ExifReader::new().parse(&mut builder.cursor()).unwrap();
    let tag = document.ifd0().get_by_id(0x9999).unwrap();

    assert_eq!(tag.name, "Unknown-0x9999");
    assert_eq!(tag.value, DecodedValue::Raw(vec![1, 2, 3, 4]));
    assert_eq!(document.ifd0()["ImageWidth"], DecodedValue::Int(vec![5]));
}

#[test]
fn test_custom_dictionaries() {
    let dictionaries = TagDictionarySet::from_toml_str("[ifd0_tags]\n256 = \"Breite\"\n").unwrap();
    let reader = ExifReader::builder().dictionaries(&dictionaries).build();

    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::long(256, &[7]), Entry::long(257, &[9])], 0);
    let document = reader.parse(&mut builder.cursor()).unwrap();

    assert_eq!(document.ifd0()["Breite"], DecodedValue::Int(vec![7]));
    assert!(document.ifd0().contains("Unknown-0x0101"));
}

#[test]
fn test_value_limit_applies_to_ifd0() {
    let mut builder = TiffBuilder::little_endian();
    builder.write_ifd(&[Entry::ascii(270, "a long image description")], 0);

    let err = ExifReader::builder().max_value_bytes(8).build().parse(&mut builder.cursor()).unwrap_err();

    assert!(matches!(err.root_cause(), ExifError::ValueTooLarge { tag: 270, .. }));
    assert!(err.to_string().starts_with("IFD0"));
}
