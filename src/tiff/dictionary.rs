//! Tag dictionaries
//!
//! Read-only tables mapping tag ids to names, one per directory kind. The
//! standard set is parsed once from the embedded `exif_tags.toml` and shared
//! by every reader; callers can build their own set and inject it instead.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::{error, warn};

use crate::tiff::errors::{ExifError, ExifResult};

/// Embedded tag definitions
pub(crate) const STANDARD_TAGS_TOML: &str = include_str!("../../exif_tags.toml");

lazy_static! {
    static ref STANDARD_DICTIONARIES: TagDictionarySet = {
        TagDictionarySet::from_toml_str(STANDARD_TAGS_TOML).unwrap_or_else(|e| {
            error!("Failed to parse embedded tag definitions: {}", e);
            TagDictionarySet::default()
        })
    };
}

/// The directory kinds an Exif document is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// The primary image directory
    Ifd0,
    /// The Exif private sub-IFD
    Exif,
    /// The GPS sub-IFD
    Gps,
    /// The Interoperability sub-IFD (reached from the Exif sub-IFD)
    Interop,
}

impl Namespace {
    /// All namespaces in document order
    pub const ALL: [Namespace; 4] = [Namespace::Ifd0, Namespace::Exif, Namespace::Gps, Namespace::Interop];

    pub fn name(&self) -> &'static str {
        match self {
            Namespace::Ifd0 => "ifd0",
            Namespace::Exif => "exif",
            Namespace::Gps => "gps",
            Namespace::Interop => "interop",
        }
    }

    /// Name of the TOML table holding this namespace's tag names
    fn table_name(&self) -> &'static str {
        match self {
            Namespace::Ifd0 => "ifd0_tags",
            Namespace::Exif => "exif_tags",
            Namespace::Gps => "gps_tags",
            Namespace::Interop => "interop_tags",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Namespace {
    type Err = ExifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .iter()
            .copied()
            .find(|ns| ns.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExifError::GenericError(format!("Unknown namespace: {}", s)))
    }
}

/// Maps tag ids of one directory kind to names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDictionary {
    names: HashMap<u16, String>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u16, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    /// Name of a tag, if the dictionary knows it
    pub fn name_of(&self, id: u16) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name of a tag, or the `Unknown-0xNNNN` placeholder
    pub fn tag_name(&self, id: u16) -> String {
        self.name_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(id))
    }

    /// Reverse lookup
    pub fn id_of(&self, name: &str) -> Option<u16> {
        self.names.iter().find(|(_, n)| n.as_str() == name).map(|(&id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u16, S)> for TagDictionary {
    fn from_iter<T: IntoIterator<Item = (u16, S)>>(iter: T) -> Self {
        let mut dictionary = TagDictionary::new();
        for (id, name) in iter {
            dictionary.insert(id, name);
        }
        dictionary
    }
}

/// Placeholder name for ids missing from a dictionary
pub fn placeholder_name(id: u16) -> String {
    format!("Unknown-0x{:04x}", id)
}

/// One dictionary per namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDictionarySet {
    pub ifd0: TagDictionary,
    pub exif: TagDictionary,
    pub gps: TagDictionary,
    pub interop: TagDictionary,
}

impl TagDictionarySet {
    /// The dictionaries built from the embedded definitions
    pub fn standard() -> &'static TagDictionarySet {
        &STANDARD_DICTIONARIES
    }

    /// Parse dictionaries from a TOML string
    ///
    /// Missing tables give empty dictionaries; keys that are not valid
    /// tag ids are skipped with a warning.
    pub fn from_toml_str(content: &str) -> ExifResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| ExifError::InvalidTagDictionary(format!("Failed to parse TOML: {}", e)))?;

        let mut set = TagDictionarySet::default();
        for namespace in Namespace::ALL {
            *set.for_namespace_mut(namespace) = Self::parse_tag_table(&toml_value, namespace.table_name());
        }

        Ok(set)
    }

    /// Load dictionaries from a TOML file
    pub fn from_file(path: &str) -> ExifResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn for_namespace(&self, namespace: Namespace) -> &TagDictionary {
        match namespace {
            Namespace::Ifd0 => &self.ifd0,
            Namespace::Exif => &self.exif,
            Namespace::Gps => &self.gps,
            Namespace::Interop => &self.interop,
        }
    }

    fn for_namespace_mut(&mut self, namespace: Namespace) -> &mut TagDictionary {
        match namespace {
            Namespace::Ifd0 => &mut self.ifd0,
            Namespace::Exif => &mut self.exif,
            Namespace::Gps => &mut self.gps,
            Namespace::Interop => &mut self.interop,
        }
    }

    fn parse_tag_table(toml_value: &toml::Value, table_name: &str) -> TagDictionary {
        let mut dictionary = TagDictionary::new();
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                match (k.parse::<u16>(), v.as_str()) {
                    (Ok(id), Some(name)) => dictionary.insert(id, name),
                    _ => warn!("Skipping invalid entry {} in [{}]", k, table_name),
                }
            }
        }
        dictionary
    }
}
