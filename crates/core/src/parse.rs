//! HTML parsing and selector lookup.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! extractor to run its ordered selector chains against a post page.
//!
//! # Example
//!
//! ```rust
//! use fediscan_core::parse::Document;
//!
//! let html = r#"<div class="status__content"><p>Hello</p><p>world</p></div>"#;
//! let doc = Document::parse(html).unwrap();
//! let hit = doc.first_match(&[".missing", ".status__content"]).unwrap();
//! assert_eq!(hit.text(), "Hello world");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{FediscanError, Result};

/// Elements whose boundaries separate words in rendered text.
const BLOCK_ELEMENTS: [&str; 17] = [
    "p",
    "div",
    "br",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "ul",
    "ol",
    "blockquote",
    "pre",
    "td",
    "th",
    "tr",
];

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from malformed markup, so this only fails if the
    /// input cannot be turned into a tree at all.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Returns the first element in document order matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`FediscanError::HtmlParseError`] if the selector is invalid.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Walks `selectors` in declaration order and returns the first element
    /// matched by the first selector that matches anything.
    ///
    /// Invalid selectors are skipped. Priority comes from the slice order,
    /// never from document order or selector specificity.
    pub fn first_match(&'_ self, selectors: &[&str]) -> Option<Element<'_>> {
        selectors.iter().find_map(|selector| match self.select_first(selector) {
            Ok(found) => {
                if found.is_some() {
                    tracing::debug!(selector, "selector matched");
                }
                found
            }
            Err(e) => {
                tracing::warn!(selector, error = %e, "skipping invalid selector");
                None
            }
        })
    }

    /// Gets the `content` attribute of a `<meta>` tag by `property` or `name`.
    ///
    /// Open Graph tags use `property`, many sites emit `name` instead.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        let selector = format!(r#"meta[property="{key}"], meta[name="{key}"]"#);
        self.select_first(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.attr("content").map(collapse_whitespace))
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the visible text of this element, whitespace collapsed and trimmed.
    pub fn text(&self) -> String {
        visible_text(self.element)
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| FediscanError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Converts an HTML fragment to plain text.
///
/// Used for the status API `content` field, which is HTML.
pub fn html_to_text(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    visible_text(html.root_element())
}

/// Collects the rendered text under `element`.
///
/// Block boundaries become spaces, hidden elements are dropped, and runs of
/// whitespace collapse to one space.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();

    for node in element.descendants() {
        if let Some(el) = node.value().as_element() {
            if BLOCK_ELEMENTS.contains(&el.name()) {
                raw.push(' ');
            }
            continue;
        }

        let Some(text) = node.value().as_text() else { continue };

        let hidden = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|el| HIDDEN_ELEMENTS.contains(&el.name()));
        if !hidden {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
}

/// Collapses whitespace runs to single spaces and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta property="og:description" content="  Summary   text ">
            <title>Post</title>
        </head>
        <body>
            <div class="status__content">
                <p>First   paragraph</p><p>Second <a href="https://example.com">link</a></p>
            </div>
            <span class="username">@alice</span>
            <script>var tracking = 1;</script>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_first_in_document_order() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let p = doc.select_first("p").unwrap().unwrap();

        assert_eq!(p.text(), "First paragraph");
        assert!(doc.select_first("h1").unwrap().is_none());
    }

    #[test]
    fn test_element_text_separates_blocks() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let content = doc.select_first(".status__content").unwrap().unwrap();
        assert_eq!(content.text(), "First paragraph Second link");
    }

    #[test]
    fn test_inline_elements_do_not_split_words() {
        let doc = Document::parse("<p>un<strong>break</strong>able</p>").unwrap();
        let p = doc.select_first("p").unwrap().unwrap();
        assert_eq!(p.text(), "unbreakable");
    }

    #[test]
    fn test_hidden_text_is_dropped() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let body = doc.select_first("body").unwrap().unwrap();
        assert!(!body.text().contains("tracking"));
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select_first("[[invalid");

        assert!(matches!(result, Err(FediscanError::HtmlParseError(_))));
    }

    #[test]
    fn test_first_match_uses_declaration_order() {
        let html = r#"<span class="b">B</span><span class="a">A</span>"#;
        let doc = Document::parse(html).unwrap();

        let hit = doc.first_match(&[".a", ".b"]).unwrap();
        assert_eq!(hit.text(), "A");
    }

    #[test]
    fn test_first_match_skips_invalid_selectors() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let hit = doc.first_match(&["[[invalid", ".username"]).unwrap();
        assert_eq!(hit.text(), "@alice");
    }

    #[test]
    fn test_first_match_none() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert!(doc.first_match(&[".nope", "#missing"]).is_none());
    }

    #[test]
    fn test_meta_content() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.meta_content("og:description"), Some("Summary text".to_string()));
        assert_eq!(doc.meta_content("og:title"), None);
    }

    #[test]
    fn test_html_to_text() {
        let text = html_to_text(r#"<p>Free <span class="h-card">@crypto</span> giveaway!</p><p>Click now</p>"#);
        assert_eq!(text, "Free @crypto giveaway! Click now");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
