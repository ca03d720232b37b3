//! `<figure>` blocks and IIIF image URIs.

use super::Walk;
use crate::fragment::{Fragment, FragmentElement};
use crate::models::{FocalPoint, Image, ImageAsset, ImageSize, ImageSource};
use crate::sanitize::sanitize;
use regex::Regex;
use std::sync::OnceLock;

/// Path under which site-relative uploads live
const SITE_FILES_PATH: &str = "sites/default/files/";
const STORAGE_SCHEME: &str = "public://";
/// Storage prefix served by the IIIF image service
const IIIF_STORAGE_PREFIX: &str = "public://iiif/";
const IIIF_FULL_IMAGE: &str = "/full/full/0/default";

fn scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("valid scheme regex"))
}

fn figcaption_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<figcaption[^>]*>(.*)</figcaption>").expect("valid figcaption regex")
    })
}

pub(super) fn convert_figure(walk: &Walk<'_, '_>, markup: &str) -> Option<Image> {
    let fragment = Fragment::parse(markup);
    let figure = fragment.first("figure")?;
    let media = media_element(figure);

    let Some(src) = media.attr("src") else {
        tracing::debug!("Skipping figure without an image source");
        return None;
    };

    let storage_uri = storage_uri(src);
    let mut media_type = guess_media_type(&storage_uri);
    let uri = match storage_uri.strip_prefix(IIIF_STORAGE_PREFIX) {
        Some(path) => format!("{}{}", walk.context.iiif(), path),
        None => storage_uri,
    };

    let mut filename = basename(&uri).to_string();
    if media_type.as_deref() == Some("image/png") {
        media_type = Some("image/jpeg".to_string());
        if let Some(stem) = filename.strip_suffix(".png") {
            filename = format!("{stem}.jpg");
        }
    }

    let extension = match media_type.as_deref() {
        Some("image/gif") => "gif",
        Some("image/png") => "png",
        _ => "jpg",
    };

    // Caption Markdown is read from the raw markup, not the parsed DOM.
    let title = figure
        .first("figcaption")
        .and_then(|_| figcaption_regex().captures(markup))
        .and_then(|caps| caption_text(walk, &caps[1]));

    let inline = figure
        .attr("class")
        .is_some_and(|class| class.contains("align-left"));

    Some(Image {
        image: ImageAsset {
            source: ImageSource {
                media_type,
                uri: format!("{uri}{IIIF_FULL_IMAGE}.{extension}"),
                filename,
            },
            alt: media.attr("alt").unwrap_or_default().to_string(),
            size: ImageSize {
                width: leading_int(media.attr("width")),
                height: leading_int(media.attr("height")),
            },
            focal_point: FocalPoint::default(),
            uri,
        },
        title,
        inline,
    })
}

/// The element carrying the image attributes: the figure itself, or the
/// first `<img>` inside it when the figure has no `src`.
fn media_element(figure: FragmentElement<'_>) -> FragmentElement<'_> {
    if figure.attr("src").is_some() {
        return figure;
    }
    figure.first("img").unwrap_or(figure)
}

/// Map a `src` attribute onto a storage URI. Site-relative paths become
/// `public://` URIs; anything with a scheme is kept.
fn storage_uri(src: &str) -> String {
    let uri = src.trim_start_matches('/');
    if scheme_regex().is_match(uri) {
        uri.to_string()
    } else {
        format!("{STORAGE_SCHEME}{}", uri.replace(SITE_FILES_PATH, ""))
    }
}

fn guess_media_type(uri: &str) -> Option<String> {
    mime_guess::from_path(uri)
        .first_raw()
        .map(|mime| mime.to_string())
}

fn basename(uri: &str) -> &str {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Integer value of the leading digits, `0` when there are none
fn leading_int(value: Option<&str>) -> u32 {
    let digits: String = value
        .unwrap_or_default()
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Captions may hold Markdown; resolve it and keep the first paragraph.
fn caption_text(walk: &Walk<'_, '_>, caption: &str) -> Option<String> {
    let html = walk.parser.to_html(caption.trim());
    let fragment = Fragment::parse(&html);
    let paragraph = fragment.first("p")?;
    let text = sanitize(&paragraph.inner_html(), walk.context, false);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
