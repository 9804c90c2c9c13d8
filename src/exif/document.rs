//! Decoded Exif document
//!
//! The result of one parse: a tag group per namespace plus the byte order,
//! the container kind and any sub-IFD that had to be dropped.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::slice;

use log::warn;

use crate::exif::container::ContainerKind;
use crate::io::byte_order::ByteOrder;
use crate::tiff::dictionary::Namespace;
use crate::tiff::ifd::Ifd;
use crate::tiff::types::ScalarType;
use crate::tiff::value::DecodedValue;

/// One decoded tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: u16,
    pub name: String,
    pub field_type: ScalarType,
    pub count: u32,
    pub value: DecodedValue,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// The tags of one namespace, in file order
///
/// Lookup by name returns the first tag carrying that name; later
/// duplicates stay visible through [`TagGroup::iter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagGroup {
    tags: Vec<Tag>,
    by_name: HashMap<String, usize>,
}

impl TagGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a group from a decoded directory
    pub fn from_ifd(ifd: Ifd) -> Self {
        let mut group = TagGroup::new();
        for entry in ifd.entries {
            group.push(Tag {
                id: entry.record.id,
                name: entry.name,
                field_type: entry.record.field_type,
                count: entry.record.count,
                value: entry.value,
            });
        }
        group
    }

    /// Appends a tag, keeping the first one for name lookups
    pub fn push(&mut self, tag: Tag) {
        if self.by_name.contains_key(&tag.name) {
            warn!("Duplicate tag {} ({}), keeping the first occurrence", tag.id, tag.name);
        } else {
            self.by_name.insert(tag.name.clone(), self.tags.len());
        }
        self.tags.push(tag);
    }

    /// Decoded value of the tag with this name
    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.tag(name).map(|tag| &tag.value)
    }

    /// The full tag record with this name
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.by_name.get(name).map(|&index| &self.tags[index])
    }

    /// First tag with this id
    pub fn get_by_id(&self, id: u16) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Index<&str> for TagGroup {
    type Output = DecodedValue;

    /// Panics when no tag has this name; use [`TagGroup::get`] to probe.
    fn index(&self, name: &str) -> &DecodedValue {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no tag named {}", name),
        }
    }
}

impl<'a> IntoIterator for &'a TagGroup {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A sub-IFD that failed to decode and was left empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedGroup {
    pub namespace: Namespace,
    /// Display form of the error that caused the drop
    pub reason: String,
}

/// Everything decoded from one file
#[derive(Debug, Clone, PartialEq)]
pub struct ExifDocument {
    container: ContainerKind,
    byte_order: ByteOrder,
    ifd0: TagGroup,
    exif: TagGroup,
    gps: TagGroup,
    interop: TagGroup,
    degraded: Vec<DegradedGroup>,
}

impl ExifDocument {
    pub(crate) fn new(container: ContainerKind, byte_order: ByteOrder) -> Self {
        ExifDocument {
            container,
            byte_order,
            ifd0: TagGroup::new(),
            exif: TagGroup::new(),
            gps: TagGroup::new(),
            interop: TagGroup::new(),
            degraded: Vec::new(),
        }
    }

    pub(crate) fn set_group(&mut self, namespace: Namespace, group: TagGroup) {
        match namespace {
            Namespace::Ifd0 => self.ifd0 = group,
            Namespace::Exif => self.exif = group,
            Namespace::Gps => self.gps = group,
            Namespace::Interop => self.interop = group,
        }
    }

    pub(crate) fn mark_degraded(&mut self, namespace: Namespace, reason: String) {
        self.degraded.push(DegradedGroup { namespace, reason });
    }

    pub fn container(&self) -> ContainerKind {
        self.container
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// The tag group of a namespace (empty when the directory was absent)
    pub fn group(&self, namespace: Namespace) -> &TagGroup {
        match namespace {
            Namespace::Ifd0 => &self.ifd0,
            Namespace::Exif => &self.exif,
            Namespace::Gps => &self.gps,
            Namespace::Interop => &self.interop,
        }
    }

    /// Looks up a tag value by namespace and name
    pub fn get(&self, namespace: Namespace, name: &str) -> Option<&DecodedValue> {
        self.group(namespace).get(name)
    }

    pub fn ifd0(&self) -> &TagGroup {
        &self.ifd0
    }

    pub fn exif(&self) -> &TagGroup {
        &self.exif
    }

    pub fn gps(&self) -> &TagGroup {
        &self.gps
    }

    pub fn interop(&self) -> &TagGroup {
        &self.interop
    }

    /// Namespaces holding at least one tag, in document order
    pub fn namespaces(&self) -> Vec<Namespace> {
        Namespace::ALL
            .iter()
            .copied()
            .filter(|&ns| !self.group(ns).is_empty())
            .collect()
    }

    /// Sub-IFDs dropped under the degrade policy
    pub fn degraded(&self) -> &[DegradedGroup] {
        &self.degraded
    }

    pub fn is_degraded(&self, namespace: Namespace) -> bool {
        self.degraded.iter().any(|d| d.namespace == namespace)
    }

    /// Total number of tags across all namespaces
    pub fn tag_count(&self) -> usize {
        Namespace::ALL.iter().map(|&ns| self.group(ns).len()).sum()
    }
}
