//! Recursive list conversion.

use super::Walk;
use crate::markdown::{Block, BlockKind};
use crate::models::{List, ListItem, ListPrefix};
use crate::sanitize::sanitize;

pub(super) fn convert_list(walk: &Walk<'_, '_>, ordered: bool, items: &[Vec<Block>]) -> List {
    let mut converted = Vec::new();

    for child in items.iter().flatten() {
        match &child.kind {
            BlockKind::List { ordered, items } => {
                let nested = convert_list(walk, *ordered, items);
                converted.push(ListItem::Nested(Box::new(nested)));
            }
            _ => {
                if let Some(rendered) = walk.document.render_block(child) {
                    converted.push(ListItem::Text(sanitize(&rendered, walk.context, false)));
                }
            }
        }
    }

    List {
        prefix: if ordered {
            ListPrefix::Number
        } else {
            ListPrefix::Bullet
        },
        items: converted,
    }
}
