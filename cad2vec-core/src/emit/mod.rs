//! Vector document emission.

pub mod document;
pub mod format;
pub mod path_data;

pub use document::{emit, DocumentMetadata};
