//! Exif tag value translators
//!
//! This module turns decoded tag values into human-readable descriptions
//! for display. Enumerated codes come from the `codes` tables of the
//! embedded tag definitions; a few tags with structured values (GPS
//! coordinates and timestamps, exposure settings) get dedicated formatting.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{error, warn};

use crate::exif::document::Tag;
use crate::tiff::dictionary::{Namespace, STANDARD_TAGS_TOML};
use crate::tiff::value::DecodedValue;

/// Code descriptions keyed by namespace, tag name and displayed value
type CodeTables = HashMap<(Namespace, String), HashMap<String, String>>;

lazy_static! {
    static ref CODE_TABLES: CodeTables = parse_code_tables(STANDARD_TAGS_TOML);
}

fn parse_code_tables(content: &str) -> CodeTables {
    let mut tables = CodeTables::new();
    let toml_value: toml::Value = match content.parse() {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse embedded code tables: {}", e);
            return tables;
        }
    };

    let Some(codes) = toml_value.get("codes").and_then(|v| v.as_table()) else {
        return tables;
    };

    for (namespace_name, tag_tables) in codes {
        let Ok(namespace) = namespace_name.parse::<Namespace>() else {
            warn!("Skipping code tables for unknown namespace {}", namespace_name);
            continue;
        };
        let Some(tag_tables) = tag_tables.as_table() else { continue };

        for (tag_name, entries) in tag_tables {
            let Some(entries) = entries.as_table() else { continue };
            let table = entries
                .iter()
                .filter_map(|(code, desc)| desc.as_str().map(|d| (code.clone(), d.to_string())))
                .collect();
            tables.insert((namespace, tag_name.clone()), table);
        }
    }

    tables
}

/// Looks up the description of an enumerated code
pub fn code_description(namespace: Namespace, tag_name: &str, code: &str) -> Option<&'static str> {
    CODE_TABLES
        .get(&(namespace, tag_name.to_string()))
        .and_then(|table| table.get(code))
        .map(String::as_str)
}

/// Describes a tag's value for display
///
/// Falls back to the plain value display when no translation applies.
pub fn describe(namespace: Namespace, tag: &Tag) -> String {
    let raw = tag.value.to_string();
    if let Some(desc) = code_description(namespace, &tag.name, &raw) {
        return desc.to_string();
    }

    let formatted = match (namespace, tag.name.as_str()) {
        (Namespace::Gps, "GPSVersionID") => dotted_version(&tag.value),
        (Namespace::Gps, "GPSTimeStamp") => gps_time(&tag.value),
        (Namespace::Gps, "GPSLatitude" | "GPSLongitude" | "GPSDestLatitude" | "GPSDestLongitude") => {
            degrees_minutes_seconds(&tag.value)
        }
        (Namespace::Exif, "ExposureTime") => tag.value.as_rational().map(|(n, d)| format!("{}/{} s", n, d)),
        (Namespace::Exif, "FNumber") => rational_value(&tag.value).map(|f| format!("f/{:.1}", f)),
        (Namespace::Exif, "FocalLength") => rational_value(&tag.value).map(|f| format!("{:.1} mm", f)),
        (Namespace::Exif, "ExifVersion" | "FlashpixVersion") | (Namespace::Interop, "InteroperabilityVersion") => {
            tag.value.as_raw().and_then(version_string)
        }
        _ => None,
    };

    formatted.unwrap_or(raw)
}

/// `[2, 3, 0, 0]` as `2.3.0.0`
fn dotted_version(value: &DecodedValue) -> Option<String> {
    let parts = value.as_integers()?;
    Some(parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join("."))
}

/// Three rationals (hours, minutes, seconds) as `hh:mm:ssZ`
fn gps_time(value: &DecodedValue) -> Option<String> {
    let parts = rational_triplet(value)?;
    let seconds = parts[2];
    let seconds = if seconds.fract() == 0.0 {
        format!("{:02}", seconds as u32)
    } else {
        format!("{:05.2}", seconds)
    };
    Some(format!("{:02}:{:02}:{}Z", parts[0] as u32, parts[1] as u32, seconds))
}

/// Three rationals (degrees, minutes, seconds) as `D° M' S"`
fn degrees_minutes_seconds(value: &DecodedValue) -> Option<String> {
    let parts = rational_triplet(value)?;
    Some(format!("{}° {}' {:.2}\"", parts[0], parts[1], parts[2]))
}

/// `0231` as `2.31`
fn version_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    let major = text[..2].trim_start_matches('0');
    let major = if major.is_empty() { "0" } else { major };
    Some(format!("{}.{}", major, &text[2..]))
}

fn rational_triplet(value: &DecodedValue) -> Option<[f64; 3]> {
    match value.as_rationals()? {
        [a, b, c] => Some([ratio(*a)?, ratio(*b)?, ratio(*c)?]),
        _ => None,
    }
}

fn rational_value(value: &DecodedValue) -> Option<f64> {
    value.as_rational().and_then(ratio)
}

fn ratio((numerator, denominator): (i64, i64)) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}
