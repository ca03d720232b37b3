//! CLI command implementations.

pub mod convert;

pub use convert::{convert_document, ConvertArgs};
