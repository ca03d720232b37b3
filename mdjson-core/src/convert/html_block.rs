//! Raw HTML blocks: tables and figures.

use super::{image, Walk};
use crate::config::EncodeKind;
use crate::models::{Node, Table};
use crate::sanitize::sanitize;
use regex::Regex;
use std::sync::OnceLock;

fn table_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^(<table[^>]*>)(.*)(</table>)$").expect("valid table regex")
    })
}

fn figure_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^<figure.*</figure>$").expect("valid figure regex"))
}

pub(super) fn convert_html_block(walk: &Walk<'_, '_>, rendered: &str) -> Option<Node> {
    let contents = rendered.trim();

    if let Some(caps) = table_regex().captures(contents) {
        let contents = if walk.context.encodes(EncodeKind::Table) {
            format!(
                "{}{}{}",
                &caps[1],
                sanitize(&caps[2], walk.context, true),
                &caps[3]
            )
        } else {
            contents.to_string()
        };

        return Some(Node::Table(Table {
            tables: vec![sanitize(&contents, walk.context, false)],
        }));
    }

    if figure_regex().is_match(contents) {
        return image::convert_figure(walk, contents).map(Node::Image);
    }

    None
}
