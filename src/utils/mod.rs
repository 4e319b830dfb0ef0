//! Utility modules
//!
//! Small helpers shared across handlers and services.

pub mod string;

pub use string::{log_preview, truncate_str, truncate_with_suffix};
