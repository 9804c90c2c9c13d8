//! Utility modules for common functionality
//!
//! This module provides the formatting and presentation helpers used
//! throughout the application.

pub(crate) mod format_utils;
pub mod tag_translators;
