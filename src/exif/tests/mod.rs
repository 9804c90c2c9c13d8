//! Unit tests for container sniffing and the directory walker

mod walker_tests;
