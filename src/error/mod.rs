//! Error types for conform failures.
//!
//! This module provides types for representing conform errors with stable
//! message keys, JSON-Pointer paths, and nested causes.

mod conform_error;

pub use conform_error::{ConformError, ConformErrors};
