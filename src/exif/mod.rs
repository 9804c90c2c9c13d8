//! Exif document assembly
//!
//! Locates the TIFF stream inside its container, walks IFD0 and the
//! sub-IFDs it points to and collects the decoded tags per namespace.

pub mod container;
pub mod document;
pub mod walker;
#[cfg(test)]
mod tests;

pub use container::{Container, ContainerKind, TiffPayload};
pub use document::{DegradedGroup, ExifDocument, Tag, TagGroup};
pub use walker::{ExifReader, ExifReaderBuilder, ParseOptions, ParseStage, SubIfdPolicy};
