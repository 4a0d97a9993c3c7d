//! Interoperability with foreign value representations.
//!
//! The engine's own [`crate::Value`] is richer than JSON (times, byte
//! strings, symbolic keys, custom values); this module bridges the two
//! representations for ingestion and reporting.

pub mod json;

pub use json::{from_json, to_json};
