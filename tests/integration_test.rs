//! Integration tests for the public API

extern crate std;

use std::io::Cursor;
use std::io::Write;

use exifkit::tiff::ScalarType;
use exifkit::utils::tag_translators;
use exifkit::{DecodedValue, ErrorKind, ExifReader, Namespace, SubIfdPolicy};

/// Little-endian TIFF: IFD0 (Orientation, Exif pointer) and an Exif IFD (FNumber)
fn sample_tiff() -> Vec<u8> {
    let mut buffer = Vec::new();

    // TIFF header (little-endian)
    buffer.extend_from_slice(&[0x49, 0x49]); // "II" for little-endian
    buffer.extend_from_slice(&[42, 0]);      // TIFF magic number
    buffer.extend_from_slice(&[8, 0, 0, 0]); // Offset to IFD0

    // IFD0 with two entries (offset 8)
    buffer.extend_from_slice(&[2, 0]);       // Number of entries

    // Entry 1: Orientation (tag 274)
    buffer.extend_from_slice(&[0x12, 0x01]); // Tag (274)
    buffer.extend_from_slice(&[3, 0]);       // Type (SHORT)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[6, 0, 0, 0]); // Value (right-top)

    // Entry 2: ExifIFDPointer (tag 34665)
    buffer.extend_from_slice(&[0x69, 0x87]); // Tag (34665)
    buffer.extend_from_slice(&[4, 0]);       // Type (LONG)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[38, 0, 0, 0]); // Offset of the Exif IFD

    // Next IFD offset (0 = no more IFDs)
    buffer.extend_from_slice(&[0, 0, 0, 0]);

    // Exif IFD with one entry (offset 38)
    buffer.extend_from_slice(&[1, 0]);

    // Entry: FNumber (tag 33437), value stored after the IFD
    buffer.extend_from_slice(&[0x9D, 0x82]); // Tag (33437)
    buffer.extend_from_slice(&[5, 0]);       // Type (RATIONAL)
    buffer.extend_from_slice(&[1, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[56, 0, 0, 0]); // Value offset
    buffer.extend_from_slice(&[0, 0, 0, 0]); // No next IFD

    // FNumber value (offset 56): 28/10
    buffer.extend_from_slice(&[28, 0, 0, 0]);
    buffer.extend_from_slice(&[10, 0, 0, 0]);

    buffer
}

/// Wraps a TIFF stream in a JPEG APP1 segment
fn wrap_in_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&[0xFF, 0xD8]); // SOI
    buffer.extend_from_slice(&[0xFF, 0xE1]); // APP1
    buffer.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    buffer.extend_from_slice(b"Exif\0\0");
    buffer.extend_from_slice(tiff);
    buffer.extend_from_slice(&[0xFF, 0xD9]); // EOI
    buffer
}

#[test]
fn test_complete_tiff_workflow() {
    let mut cursor = Cursor::new(sample_tiff());

    let document = exifkit::parse(&mut cursor).unwrap();

    std::assert_eq!(document.ifd0()["Orientation"], DecodedValue::Int(vec![6]));
    std::assert_eq!(document.exif()["FNumber"], DecodedValue::Rational(vec![(28, 10)]));

    let f_number = document.exif().tag("FNumber").unwrap();
    std::assert_eq!(f_number.field_type, ScalarType::Rational);
    std::assert_eq!(tag_translators::describe(Namespace::Exif, f_number), "f/2.8");

    let orientation = document.ifd0().tag("Orientation").unwrap();
    std::assert_eq!(tag_translators::describe(Namespace::Ifd0, orientation), "right-top");
}

#[test]
fn test_jpeg_and_tiff_give_the_same_tags() {
    let tiff = sample_tiff();
    let from_tiff = exifkit::parse(&mut Cursor::new(tiff.clone())).unwrap();
    let from_jpeg = exifkit::parse(&mut Cursor::new(wrap_in_jpeg(&tiff))).unwrap();

    std::assert_eq!(from_tiff.ifd0(), from_jpeg.ifd0());
    std::assert_eq!(from_tiff.exif(), from_jpeg.exif());
}

#[test]
fn test_parse_file() {
    let path = std::env::temp_dir().join(format!("exifkit-integration-{}.jpg", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&wrap_in_jpeg(&sample_tiff())).unwrap();
    drop(file);

    let result = exifkit::parse_file(path.to_str().unwrap());
    std::fs::remove_file(&path).unwrap();

    let document = result.unwrap();
    std::assert_eq!(document.namespaces(), vec![Namespace::Ifd0, Namespace::Exif]);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = exifkit::parse_file("/nonexistent/exifkit/image.jpg").unwrap_err();
    std::assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_reader_is_shareable_between_threads() {
    let reader = ExifReader::builder().sub_ifd_policy(SubIfdPolicy::Strict).build();
    let tiff = sample_tiff();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let tiff = tiff.clone();
            scope.spawn(move || {
                let document = reader.parse(&mut Cursor::new(tiff)).unwrap();
                std::assert_eq!(document.tag_count(), 3);
            });
        }
    });
}
