//! Paragraphs, including the button and YouTube embeds authored inline.

use super::Walk;
use crate::fragment::Fragment;
use crate::models::{Button, Node, YouTube};
use crate::sanitize::sanitize;
use regex::Regex;
use std::sync::OnceLock;

/// Custom element the editor emits for call-to-action buttons
const BUTTON_TAG: &str = "elifebutton";

fn button_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^<{BUTTON_TAG}.*</{BUTTON_TAG}>")).expect("valid button regex")
    })
}

fn youtube_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^<oembed>(?P<youtube>https://www\.youtube\.com/watch\?v=.*)</oembed>")
            .expect("valid oembed regex")
    })
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:.*[^a-zA-Z0-9_-])?(?P<id>[a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-].*)?$")
            .expect("valid video id regex")
    })
}

pub(super) fn convert_paragraph(walk: &Walk<'_, '_>, rendered: &str) -> Option<Node> {
    if button_regex().is_match(rendered) {
        return convert_button(walk, rendered).map(Node::Button);
    }

    if let Some(caps) = youtube_regex().captures(rendered) {
        return youtube_id(&caps["youtube"]).map(|id| Node::YouTube(YouTube::new(id)));
    }

    Some(Node::paragraph(sanitize(rendered, walk.context, false)))
}

fn convert_button(walk: &Walk<'_, '_>, rendered: &str) -> Option<Button> {
    let fragment = Fragment::parse(rendered);
    let button = fragment.first(BUTTON_TAG)?;
    let uri = button.attr("data-href").unwrap_or_default();

    Some(Button {
        text: sanitize(&button.inner_html(), walk.context, false),
        uri: uri.trim_start_matches('/').to_string(),
    })
}

/// The 11 character video id inside a watch URL
fn youtube_id(url: &str) -> Option<String> {
    let id = video_id_regex().captures(url)?.name("id")?.as_str().to_string();
    tracing::debug!("Found YouTube embed {}", id);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertContext;
    use crate::convert::Normalizer;
    use serde_json::json;

    fn convert(markdown: &str, context: &ConvertContext) -> serde_json::Value {
        Normalizer::new()
            .normalize_to_value(markdown, context)
            .unwrap()
    }

    #[test]
    fn test_youtube_embed() {
        let md = "<oembed>https://www.youtube.com/watch?v=dQw4w9WgXcQ</oembed>\n";
        assert_eq!(
            convert(md, &ConvertContext::default()),
            json!([{"type": "youtube", "id": "dQw4w9WgXcQ", "width": 16, "height": 9}])
        );
    }

    #[test]
    fn test_youtube_id_with_extra_parameters() {
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&amp;t=10s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(youtube_id("https://www.youtube.com/watch?v=short"), None);
    }

    #[test]
    fn test_button() {
        let md = "<elifebutton data-href=\"/collections/x\">Read *more*</elifebutton>\n";
        assert_eq!(
            convert(md, &ConvertContext::default()),
            json!([{"type": "button", "text": "Read <em>more</em>", "uri": "collections/x"}])
        );
    }

    #[test]
    fn test_button_without_href() {
        let md = "<elifebutton>Go</elifebutton>\n";
        assert_eq!(
            convert(md, &ConvertContext::default()),
            json!([{"type": "button", "text": "Go", "uri": ""}])
        );
    }

    #[test]
    fn test_paragraph_substitutions() {
        let context = ConvertContext::new()
            .with_regex("http://", "https://")
            .unwrap();
        let md = "See <a href=\"http://example.org\">this</a>.\n";
        assert_eq!(
            convert(md, &context),
            json!([{"type": "paragraph", "text": "See <a href=\"https://example.org\">this</a>."}])
        );
    }

    #[test]
    fn test_other_oembed_stays_paragraph() {
        let md = "<oembed>https://vimeo.com/12345</oembed>\n";
        assert_eq!(
            convert(md, &ConvertContext::default()),
            json!([{"type": "paragraph", "text": "<oembed>https://vimeo.com/12345</oembed>"}])
        );
    }
}
