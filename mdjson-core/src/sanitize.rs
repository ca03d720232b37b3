//! Normalization of converted text and markup payloads.

use crate::config::ConvertContext;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Standard alphabet, accepting payloads with or without `=` padding
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Clean up a converted fragment.
///
/// With `decode` the content is base64 decoded first. The result is
/// trimmed and then passed through every configured substitution in order.
/// A payload that fails to decode degrades to an empty string.
pub fn sanitize(content: &str, context: &ConvertContext, decode: bool) -> String {
    let decoded;
    let content = if decode {
        decoded = decode_base64(content);
        decoded.as_str()
    } else {
        content
    };

    context
        .regexes()
        .iter()
        .fold(content.trim().to_string(), |output, substitution| {
            substitution.apply(&output)
        })
}

fn decode_base64(content: &str) -> String {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    match LENIENT_BASE64.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            tracing::warn!("Dropping payload that is not valid base64: {}", err);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(input)
    }

    #[test]
    fn test_trims_without_substitutions() {
        let context = ConvertContext::default();
        assert_eq!(sanitize("  hello \n", &context, false), "hello");
    }

    #[test]
    fn test_substitutions_apply_in_order() {
        let context = ConvertContext::new()
            .with_regex("cat", "dog")
            .unwrap()
            .with_regex("dog", "wolf")
            .unwrap();
        assert_eq!(sanitize("cat and dog", &context, false), "wolf and wolf");

        let reversed = ConvertContext::new()
            .with_regex("dog", "wolf")
            .unwrap()
            .with_regex("cat", "dog")
            .unwrap();
        assert_eq!(sanitize("cat and dog", &reversed, false), "dog and wolf");
    }

    #[test]
    fn test_capture_groups_in_replacement() {
        let context = ConvertContext::new()
            .with_regex(r"<b>(.*?)</b>", "<strong>$1</strong>")
            .unwrap();
        assert_eq!(
            sanitize("<b>bold</b> text", &context, false),
            "<strong>bold</strong> text"
        );
    }

    #[test]
    fn test_is_idempotent() {
        let context = ConvertContext::new()
            .with_regex(r"\s+", " ")
            .unwrap()
            .with_regex("<br>", "<br />")
            .unwrap();
        let once = sanitize("  a   b<br>c  ", &context, false);
        let twice = sanitize(&once, &context, false);
        assert_eq!(once, "a b<br />c");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_decode_before_trim() {
        let context = ConvertContext::default();
        let encoded = encode("  <tr><td>1</td></tr>\n");
        assert_eq!(sanitize(&encoded, &context, true), "<tr><td>1</td></tr>");
    }

    #[test]
    fn test_decode_ignores_line_wrapping() {
        let context = ConvertContext::default();
        let encoded = encode("wrapped payload");
        let (head, tail) = encoded.split_at(6);
        let wrapped = format!("{head}\n{tail}\n");
        assert_eq!(sanitize(&wrapped, &context, true), "wrapped payload");
    }

    #[test]
    fn test_decode_accepts_missing_padding() {
        let context = ConvertContext::default();
        let unpadded =
            base64::engine::general_purpose::STANDARD_NO_PAD.encode("<tr><td>ab</td></tr>");
        assert!(!unpadded.ends_with('='));
        assert_eq!(sanitize(&unpadded, &context, true), "<tr><td>ab</td></tr>");
    }

    #[test]
    fn test_invalid_base64_degrades_to_empty() {
        let context = ConvertContext::default();
        assert_eq!(sanitize("not base64!!", &context, true), "");
    }
}
