//! Block tree folded from the flat pulldown-cmark event stream.
//!
//! Blocks do not copy events; each one records the span it covers in the
//! document's event buffer. `span` includes the opening and closing tag
//! events, `inner` excludes them.

use pulldown_cmark::{CodeBlockKind, Event, Tag};
use std::ops::Range;

/// A structural unit of parsed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub span: Range<usize>,
    pub inner: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading(u8),
    /// `tight` paragraphs are bare inline runs inside tight list items
    Paragraph { tight: bool },
    HtmlBlock,
    List { ordered: bool, items: Vec<Vec<Block>> },
    BlockQuote(Vec<Block>),
    IndentedCode,
    FencedCode,
    ThematicBreak,
    /// Any other block construct the converter does not classify
    Other,
}

/// Fold events into top-level blocks.
pub(crate) fn build_blocks(events: &[Event<'_>]) -> Vec<Block> {
    let mut builder = TreeBuilder { events, pos: 0 };
    let mut blocks = builder.parse_blocks();

    // A stray closing tag at the top level would stop the walk early.
    while builder.pos < events.len() {
        builder.pos += 1;
        blocks.extend(builder.parse_blocks());
    }

    blocks
}

struct TreeBuilder<'e, 'a> {
    events: &'e [Event<'a>],
    pos: usize,
}

impl TreeBuilder<'_, '_> {
    /// Parse sibling blocks up to the closing tag of the enclosing container.
    /// The closing tag itself is left unconsumed.
    fn parse_blocks(&mut self) -> Vec<Block> {
        let events = self.events;
        let mut blocks = Vec::new();

        while let Some(event) = events.get(self.pos) {
            match event {
                Event::End(_) => break,
                Event::Start(tag) if !is_inline(tag) => blocks.push(self.parse_container(tag)),
                Event::Rule => {
                    blocks.push(Block {
                        kind: BlockKind::ThematicBreak,
                        span: self.pos..self.pos + 1,
                        inner: self.pos + 1..self.pos + 1,
                    });
                    self.pos += 1;
                }
                _ => blocks.push(self.parse_inline_run()),
            }
        }

        blocks
    }

    fn parse_container(&mut self, tag: &Tag<'_>) -> Block {
        let start = self.pos;
        self.pos += 1;

        let kind = match tag {
            Tag::List(first) => {
                let ordered = first.is_some();
                let mut items = Vec::new();
                while let Some(Event::Start(Tag::Item)) = self.events.get(self.pos) {
                    self.pos += 1;
                    items.push(self.parse_blocks());
                    self.consume_end();
                }
                // Anything unexpected before the list closes is skipped.
                let end = self.skip_to_end(self.pos);
                self.pos = end;
                BlockKind::List { ordered, items }
            }
            Tag::BlockQuote(_) => BlockKind::BlockQuote(self.parse_blocks()),
            leaf => {
                let end = self.skip_to_end(self.pos);
                self.pos = end;
                match leaf {
                    Tag::Heading { level, .. } => BlockKind::Heading(*level as u8),
                    Tag::Paragraph => BlockKind::Paragraph { tight: false },
                    Tag::HtmlBlock => BlockKind::HtmlBlock,
                    Tag::CodeBlock(CodeBlockKind::Indented) => BlockKind::IndentedCode,
                    Tag::CodeBlock(CodeBlockKind::Fenced(_)) => BlockKind::FencedCode,
                    _ => BlockKind::Other,
                }
            }
        };

        let inner_end = self.pos;
        self.consume_end();

        Block {
            kind,
            span: start..self.pos,
            inner: start + 1..inner_end,
        }
    }

    /// Inline content sitting directly in a container (tight list items).
    fn parse_inline_run(&mut self) -> Block {
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(event) = self.events.get(self.pos) {
            match event {
                Event::Start(tag) if is_inline(tag) => depth += 1,
                Event::Start(_) | Event::Rule => break,
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }

        Block {
            kind: BlockKind::Paragraph { tight: true },
            span: start..self.pos,
            inner: start..self.pos,
        }
    }

    /// Index of the closing tag balancing an already consumed opening tag.
    fn skip_to_end(&self, from: usize) -> usize {
        let mut depth = 0usize;
        let mut pos = from;

        while let Some(event) = self.events.get(pos) {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return pos,
                Event::End(_) => depth -= 1,
                _ => {}
            }
            pos += 1;
        }

        pos
    }

    fn consume_end(&mut self) {
        if let Some(Event::End(_)) = self.events.get(self.pos) {
            self.pos += 1;
        }
    }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript
            | Tag::Link { .. }
            | Tag::Image { .. }
    )
}
