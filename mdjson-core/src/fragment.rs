//! Minimal HTML fragment querying for the handful of custom tags the
//! converter understands (`figure`, `figcaption`, `img`, `p`, button and
//! `oembed` tags).

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML fragment
pub struct Fragment {
    html: Html,
}

impl Fragment {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    /// All elements with the given tag name, in document order
    pub fn find(&self, tag: &str) -> Vec<FragmentElement<'_>> {
        let Ok(selector) = Selector::parse(tag) else {
            return Vec::new();
        };
        let elements = self.html.select(&selector).map(FragmentElement).collect();
        elements
    }

    pub fn first(&self, tag: &str) -> Option<FragmentElement<'_>> {
        let selector = Selector::parse(tag).ok()?;
        let element = self.html.select(&selector).next()?;
        Some(FragmentElement(element))
    }

    pub fn count(&self, tag: &str) -> usize {
        self.find(tag).len()
    }
}

/// An element inside a [`Fragment`]
#[derive(Clone, Copy)]
pub struct FragmentElement<'a>(ElementRef<'a>);

impl<'a> FragmentElement<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    /// First descendant with the given tag name
    pub fn first(&self, tag: &str) -> Option<FragmentElement<'a>> {
        let selector = Selector::parse(tag).ok()?;
        let element = self.0.select(&selector).next()?;
        Some(FragmentElement(element))
    }

    pub fn count(&self, tag: &str) -> usize {
        let Ok(selector) = Selector::parse(tag) else {
            return 0;
        };
        let count = self.0.select(&selector).count();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_attributes() {
        let fragment = Fragment::parse(
            r#"<figure class="image align-left" src="/a.png" width="10"><figcaption>Cap <em>x</em></figcaption></figure>"#,
        );

        let figure = fragment.first("figure").expect("figure");
        assert_eq!(figure.attr("src"), Some("/a.png"));
        assert_eq!(figure.attr("width"), Some("10"));
        assert_eq!(figure.attr("height"), None);
        assert_eq!(figure.count("figcaption"), 1);
        assert_eq!(
            figure.first("figcaption").map(|c| c.inner_html()),
            Some("Cap <em>x</em>".to_string())
        );
    }

    #[test]
    fn test_custom_tags() {
        let fragment =
            Fragment::parse(r#"<elifebutton data-href="/go">Go <b>now</b></elifebutton>"#);
        let button = fragment.first("elifebutton").expect("button");

        assert_eq!(button.attr("data-href"), Some("/go"));
        assert_eq!(button.inner_html(), "Go <b>now</b>");
        assert_eq!(fragment.count("elifebutton"), 1);
        assert_eq!(fragment.count("oembed"), 0);
    }

    #[test]
    fn test_missing_tag() {
        let fragment = Fragment::parse("<p>text</p>");
        assert!(fragment.first("figure").is_none());
        assert!(fragment.find("figure").is_empty());
    }
}
