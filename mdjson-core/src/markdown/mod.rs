//! Markdown front end: parsing into a block tree and rendering block markup.

pub mod blocks;

use pulldown_cmark::{html, Event, Options, Parser};
use std::ops::Range;

pub use blocks::{Block, BlockKind};

/// CommonMark parser producing [`Document`] block trees
#[derive(Debug, Clone, Copy)]
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        // Plain CommonMark: tables and other structures arrive as HTML blocks.
        Self {
            options: Options::empty(),
        }
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    pub fn parse<'a>(&self, source: &'a str) -> Document<'a> {
        let events: Vec<Event<'a>> = Parser::new_ext(source, self.options).collect();
        let children = blocks::build_blocks(&events);
        Document { events, children }
    }

    /// Convert markdown straight to HTML
    pub fn to_html(&self, markdown: &str) -> String {
        let mut html_output = String::new();
        html::push_html(&mut html_output, Parser::new_ext(markdown, self.options));
        html_output
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a document with the default CommonMark options
pub fn parse_document(source: &str) -> Document<'_> {
    MarkdownParser::new().parse(source)
}

/// Convert markdown to HTML with the default CommonMark options
pub fn markdown_to_html(markdown: &str) -> String {
    MarkdownParser::new().to_html(markdown)
}

/// A parsed document: the event buffer plus the blocks indexing into it.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    events: Vec<Event<'a>>,
    children: Vec<Block>,
}

impl<'a> Document<'a> {
    /// Top-level blocks in source order
    pub fn children(&self) -> &[Block] {
        &self.children
    }

    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// Render a slice of the event buffer to HTML
    pub fn render(&self, range: Range<usize>) -> String {
        let mut html_output = String::new();
        if let Some(events) = self.events.get(range) {
            html::push_html(&mut html_output, events.iter().cloned());
        }
        html_output
    }

    /// Rendered markup of a block.
    ///
    /// Headings, paragraphs and block quotes yield the markup inside their
    /// wrapping element; other blocks yield their complete markup. Blocks
    /// rendering to nothing but whitespace yield `None`.
    pub fn render_block(&self, block: &Block) -> Option<String> {
        let range = match block.kind {
            BlockKind::Heading(_) | BlockKind::Paragraph { .. } | BlockKind::BlockQuote(_) => {
                block.inner.clone()
            }
            _ => block.span.clone(),
        };

        let rendered = self.render(range);
        if rendered.trim().is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    /// Literal text content of a block, without any markup (code blocks)
    pub fn string_content(&self, block: &Block) -> String {
        self.events
            .get(block.inner.clone())
            .unwrap_or_default()
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) => Some(text.as_ref()),
                _ => None,
            })
            .collect()
    }
}
