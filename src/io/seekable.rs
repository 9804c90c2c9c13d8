//! Seekable reader trait
//!
//! Every parse works against one caller-owned stream that supports both
//! reading and seeking. This module names that combination once.

use std::io::{self, Read, Seek, SeekFrom};

/// Trait for readers that can both read and seek
///
/// Implemented for anything that is `Read + Seek + Send + Sync`, so files,
/// `BufReader<File>` and `Cursor<Vec<u8>>` / `Cursor<&[u8]>` all qualify.
pub trait SeekableReader: Read + Seek + Send + Sync {
    /// Total length of the stream in bytes.
    ///
    /// The current position is restored before returning.
    fn total_len(&mut self) -> io::Result<u64> {
        let current = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if current != len {
            self.seek(SeekFrom::Start(current))?;
        }
        Ok(len)
    }
}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
