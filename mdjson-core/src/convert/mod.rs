//! Conversion of Markdown documents into the structured content model.
//!
//! The [`Normalizer`] walks the top-level blocks of a parsed document,
//! converts each one into at most one [`Node`], then folds the flat result
//! into sections with [`build_hierarchy`].

mod heading;
mod html_block;
mod image;
mod list;
mod paragraph;

pub use heading::DepthOffset;

use crate::config::{ConvertContext, EncodeKind};
use crate::hierarchy::build_hierarchy;
use crate::markdown::{Block, BlockKind, Document, MarkdownParser};
use crate::models::{Code, Node, Quote, Section};
use crate::sanitize::sanitize;
use regex::Regex;
use std::sync::OnceLock;

/// Converts Markdown source into content model nodes.
///
/// A normalizer holds no per-document state and can be shared between
/// threads; every call to [`Normalizer::normalize`] starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    parser: MarkdownParser,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            parser: MarkdownParser::new(),
        }
    }

    pub fn with_parser(parser: MarkdownParser) -> Self {
        Self { parser }
    }

    /// Convert a Markdown document into a nested node sequence
    pub fn normalize(&self, source: &str, context: &ConvertContext) -> Vec<Node> {
        let document = self.parser.parse(source);
        let mut walk = Walk {
            document: &document,
            context,
            parser: &self.parser,
            depth_offset: DepthOffset::new(),
        };

        let nodes: Vec<Node> = document
            .children()
            .iter()
            .filter_map(|block| walk.convert(block))
            .collect();

        tracing::debug!(
            "Converted {} of {} top-level blocks",
            nodes.len(),
            document.children().len()
        );

        build_hierarchy(nodes)
    }

    /// Convert a Markdown document into a JSON array
    pub fn normalize_to_value(
        &self,
        source: &str,
        context: &ConvertContext,
    ) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.normalize(source, context))
    }
}

/// State of a single document conversion.
pub(crate) struct Walk<'w, 'a> {
    pub(crate) document: &'w Document<'a>,
    pub(crate) context: &'w ConvertContext,
    pub(crate) parser: &'w MarkdownParser,
    depth_offset: DepthOffset,
}

impl Walk<'_, '_> {
    /// Convert one block. `None` means the block contributes nothing.
    fn convert(&mut self, block: &Block) -> Option<Node> {
        let node = match &block.kind {
            BlockKind::Heading(level) => Some(self.convert_heading(block, *level)),
            BlockKind::HtmlBlock => self
                .document
                .render_block(block)
                .and_then(|rendered| html_block::convert_html_block(self, &rendered)),
            BlockKind::Paragraph { .. } => self
                .document
                .render_block(block)
                .and_then(|rendered| paragraph::convert_paragraph(self, &rendered)),
            BlockKind::List { ordered, items } => {
                Some(Node::List(list::convert_list(self, *ordered, items)))
            }
            BlockKind::BlockQuote(_) => Some(self.convert_quote(block)),
            BlockKind::IndentedCode | BlockKind::FencedCode => self.convert_code(block),
            BlockKind::ThematicBreak | BlockKind::Other => None,
        };

        if node.is_none() {
            tracing::debug!("No output for block {:?}", block.kind);
        }

        node
    }

    fn convert_heading(&mut self, block: &Block, level: u8) -> Node {
        let depth = self.depth_offset.depth_for(level);
        let title = self.document.render(block.inner.clone());
        Node::Section(Section::new(sanitize(&title, self.context, false), depth))
    }

    /// Block quotes always produce a quote, empty ones included.
    fn convert_quote(&self, block: &Block) -> Node {
        let rendered = self.document.render(block.inner.clone());
        let text = quote_regex().replace(&rendered, "$1");
        Node::Quote(Quote::new(text.trim()))
    }

    fn convert_code(&self, block: &Block) -> Option<Node> {
        let contents = self.document.string_content(block);
        if contents.is_empty() {
            return None;
        }

        let contents = if self.context.encodes(EncodeKind::Code) {
            sanitize(&contents, self.context, true)
        } else {
            contents
        };

        Some(Node::Code(Code {
            code: sanitize(&contents, self.context, false),
        }))
    }
}

fn quote_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^\s*<p>(.*)</p>\s*$").expect("valid quote regex"))
}
