//! I/O utilities for stream handling
//!
//! Traits and helpers shared by the container sniffer and the TIFF reader.

pub mod seekable;
pub mod byte_order;
