//! Unit tests for the TIFF layer

mod reader_tests;
