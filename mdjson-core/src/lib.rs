//! # mdjson-core
//!
//! Converts author-written Markdown, with a few embedded HTML extensions,
//! into a normalized hierarchical content model ready to be serialized as
//! JSON.
//!
//! The pipeline runs in four stages: the Markdown is parsed into a block
//! tree, each top-level block is classified and converted, converted text is
//! sanitized, and the flat result is folded into at most two levels of
//! sections.
//!
//! ```
//! use mdjson_core::{ConvertContext, Normalizer};
//!
//! let nodes = Normalizer::new().normalize("## Title\n\nBody.", &ConvertContext::default());
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes[0].type_name(), "section");
//! ```

pub mod config;
pub mod convert;
pub mod fragment;
pub mod hierarchy;
pub mod markdown;
pub mod models;
pub mod sanitize;

pub use config::{ConfigError, ConvertContext, ConvertOptions, EncodeKind, DEFAULT_IIIF};
pub use convert::{DepthOffset, Normalizer};
pub use hierarchy::build_hierarchy;
pub use markdown::{markdown_to_html, parse_document, Document, MarkdownParser};
pub use models::{
    Button, Code, FocalPoint, Image, ImageAsset, ImageSize, ImageSource, List, ListItem,
    ListPrefix, Node, Paragraph, Quote, Section, SectionDepth, Table, YouTube,
};
pub use sanitize::sanitize;

/// Convert a Markdown document with a default [`Normalizer`]
pub fn normalize(source: &str, context: &ConvertContext) -> Vec<Node> {
    Normalizer::new().normalize(source, context)
}
