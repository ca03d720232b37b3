//! Content model emitted by the converter.
//!
//! Every node serializes as a JSON object tagged by `"type"`. Optional
//! fields are omitted rather than emitted as `null`.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Converted document node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Section(Section),
    Table(Table),
    Image(Image),
    Button(Button),
    #[serde(rename = "youtube")]
    YouTube(YouTube),
    Paragraph(Paragraph),
    List(List),
    Quote(Quote),
    Code(Code),
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Section(_) => "section",
            Node::Table(_) => "table",
            Node::Image(_) => "image",
            Node::Button(_) => "button",
            Node::YouTube(_) => "youtube",
            Node::Paragraph(_) => "paragraph",
            Node::List(_) => "list",
            Node::Quote(_) => "quote",
            Node::Code(_) => "code",
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph(Paragraph { text: text.into() })
    }

    /// Depth of a section that has not been folded yet
    pub fn section_depth(&self) -> Option<SectionDepth> {
        match self {
            Node::Section(section) => section.depth,
            _ => None,
        }
    }
}

/// Output heading depth. Only two levels exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionDepth {
    Top = 1,
    Sub = 2,
}

impl SectionDepth {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,

    /// Used while building the hierarchy, never serialized
    #[serde(skip)]
    pub depth: Option<SectionDepth>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

impl Section {
    pub fn new(title: impl Into<String>, depth: SectionDepth) -> Self {
        Self {
            title: title.into(),
            depth: Some(depth),
            content: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub image: ImageAsset,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub uri: String,
    pub alt: String,
    pub source: ImageSource,
    pub size: ImageSize,
    pub focal_point: FocalPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub uri: String,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocalPoint {
    pub x: u8,
    pub y: u8,
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self { x: 50, y: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub text: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YouTube {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl YouTube {
    // Dimensions are not captured when the embed is authored.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: 16,
            height: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListPrefix {
    Number,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub prefix: ListPrefix,
    pub items: Vec<ListItem>,
}

/// A list entry: rendered markup, or a nested list.
///
/// A nested list serializes as a one element array holding the list node,
/// so consumers can tell a sub-list slot from a text slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Text(String),
    Nested(Box<List>),
}

impl Serialize for ListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(tag = "type", rename_all = "lowercase")]
        enum Tagged<'a> {
            List(&'a List),
        }

        match self {
            ListItem::Text(text) => serializer.serialize_str(text),
            ListItem::Nested(list) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&Tagged::List(list))?;
                seq.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub text: Vec<Node>,
}

impl Quote {
    /// A quote always holds exactly one paragraph
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: vec![Node::paragraph(text)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    pub code: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}
