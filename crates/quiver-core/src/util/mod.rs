//! Utility module for common helper functions.
//!
//! This module provides:
//! - Lenient JSON scalar coercions used by clause parsers
//! - Serde helpers for loosely typed request flags

pub mod json;

pub use json::{lenient_bool, lenient_string};
