//! Folding of the flat node sequence into a two-level section tree.

use crate::models::{Node, SectionDepth};

/// Nest content under sections.
///
/// Sub-sections are folded first, then top-level sections. A section
/// captures every following node until the next section of the same or a
/// shallower depth; sections that capture nothing are dropped. Sections
/// folded by the first pass no longer carry a depth and are captured like
/// any other node by the second pass.
pub fn build_hierarchy(nodes: Vec<Node>) -> Vec<Node> {
    [SectionDepth::Sub, SectionDepth::Top]
        .into_iter()
        .fold(nodes, fold_level)
}

fn fold_level(nodes: Vec<Node>, level: SectionDepth) -> Vec<Node> {
    let mut hierarchy = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            Node::Section(mut section) if section.depth == Some(level) => {
                section.depth = None;
                while let Some(child) = iter.next_if(|next| !closes_section(next, level)) {
                    section.content.push(child);
                }

                if section.content.is_empty() {
                    tracing::trace!(
                        "Dropping empty section '{}' at depth {}",
                        section.title,
                        level.as_u8()
                    );
                    continue;
                }

                hierarchy.push(Node::Section(section));
            }
            other => hierarchy.push(other),
        }
    }

    hierarchy
}

fn closes_section(node: &Node, level: SectionDepth) -> bool {
    node.section_depth().is_some_and(|depth| depth <= level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use serde_json::json;

    fn section(title: &str, depth: SectionDepth) -> Node {
        Node::Section(Section::new(title, depth))
    }

    #[test]
    fn test_empty_input() {
        assert!(build_hierarchy(Vec::new()).is_empty());
    }

    #[test]
    fn test_no_sections_is_noop() {
        let nodes = vec![Node::paragraph("a"), Node::paragraph("b")];
        assert_eq!(build_hierarchy(nodes.clone()), nodes);
    }

    #[test]
    fn test_two_levels() {
        let nodes = vec![
            Node::paragraph("lead"),
            section("One", SectionDepth::Top),
            Node::paragraph("p1"),
            section("One.A", SectionDepth::Sub),
            Node::paragraph("p2"),
            section("One.B", SectionDepth::Sub),
            Node::paragraph("p3"),
            section("Two", SectionDepth::Top),
            Node::paragraph("p4"),
        ];

        let value = serde_json::to_value(build_hierarchy(nodes)).unwrap();
        assert_eq!(
            value,
            json!([
                {"type": "paragraph", "text": "lead"},
                {"type": "section", "title": "One", "content": [
                    {"type": "paragraph", "text": "p1"},
                    {"type": "section", "title": "One.A", "content": [
                        {"type": "paragraph", "text": "p2"}
                    ]},
                    {"type": "section", "title": "One.B", "content": [
                        {"type": "paragraph", "text": "p3"}
                    ]}
                ]},
                {"type": "section", "title": "Two", "content": [
                    {"type": "paragraph", "text": "p4"}
                ]}
            ])
        );
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let nodes = vec![
            section("Empty sub", SectionDepth::Sub),
            section("Top", SectionDepth::Top),
            section("Sub", SectionDepth::Sub),
            Node::paragraph("p1"),
            section("Trailing", SectionDepth::Top),
        ];

        let value = serde_json::to_value(build_hierarchy(nodes)).unwrap();
        assert_eq!(
            value,
            json!([
                {"type": "section", "title": "Top", "content": [
                    {"type": "section", "title": "Sub", "content": [
                        {"type": "paragraph", "text": "p1"}
                    ]}
                ]}
            ])
        );
    }

    #[test]
    fn test_sub_section_before_any_top_section_stays_top_level() {
        let nodes = vec![
            section("Sub", SectionDepth::Sub),
            Node::paragraph("p1"),
            section("Top", SectionDepth::Top),
            Node::paragraph("p2"),
        ];

        let folded = build_hierarchy(nodes);
        assert_eq!(folded.len(), 2);
        assert_eq!(folded[0].type_name(), "section");
        assert!(folded.iter().all(|node| node.section_depth().is_none()));
    }
}
