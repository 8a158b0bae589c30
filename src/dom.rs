// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document access layer.
//!
//! Thin wrapper over [`scraper::Html`] exposing what the rules and the
//! ARIA validator need: selector queries, attribute reads, ancestry and
//! descendant traversal, and short descriptors for reporting. The
//! document is immutable once parsed.

use crate::error::{EngineError, Result};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::debug;

/// Maximum length of an element snippet in issue reports
const SNIPPET_MAX_LEN: usize = 120;

/// A parsed, read-only HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse markup into a document.
    ///
    /// Markup that is empty or whitespace-only cannot form a document and
    /// is rejected. Recoverable HTML syntax errors are tolerated the way a
    /// browser would tolerate them.
    pub fn parse(markup: &str) -> Result<Self> {
        if markup.trim().is_empty() {
            return Err(EngineError::Document("document is empty".to_string()));
        }

        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            debug!("Parsed document with {} recoverable error(s)", html.errors.len());
        }

        Ok(Self { html })
    }

    /// Read and parse a document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let markup = std::fs::read_to_string(path)?;
        Self::parse(&markup)
    }

    /// Underlying scraper tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All elements matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Every element in document order, starting at `<html>`
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }

    /// First element carrying the given `id`
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.value().id() == Some(id))
    }
}

/// Parse a CSS selector, mapping failures into [`EngineError::Selector`]
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| EngineError::Selector(css.to_string()))
}

/// Element ancestors, nearest first
pub fn ancestors<'a>(el: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.ancestors().filter_map(ElementRef::wrap)
}

/// Element descendants, excluding the element itself
pub fn descendants<'a>(el: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Primary explicit role of an element: first token of `role`, lowercased
pub fn explicit_role(el: &ElementRef<'_>) -> Option<String> {
    el.value()
        .attr("role")
        .and_then(|r| r.split_whitespace().next())
        .map(str::to_lowercase)
}

/// Whether an element can receive keyboard focus.
///
/// An explicit `tabindex` decides on its own (`-1` removes the element
/// from focus); otherwise links with `href` and form controls, `input` of
/// any type included, are focusable.
pub fn is_focusable(el: &ElementRef<'_>) -> bool {
    let element = el.value();
    if let Some(tabindex) = element.attr("tabindex") {
        return tabindex.trim() != "-1";
    }

    match element.name() {
        "a" => element.attr("href").is_some(),
        "button" | "input" | "select" | "textarea" => true,
        _ => false,
    }
}

/// Whether any descendant of `el` is focusable
pub fn has_focusable_descendant(el: &ElementRef<'_>) -> bool {
    descendants(el).any(|d| is_focusable(&d))
}

/// Opening-tag snippet of an element, e.g. `<img src="x.jpg">`
pub fn describe(el: &ElementRef<'_>) -> String {
    let element = el.value();
    let attrs: String = element
        .attrs()
        .map(|(k, v)| format!(" {}=\"{}\"", k, v))
        .collect();
    let snippet = format!("<{}{}>", element.name(), attrs);

    if snippet.chars().count() > SNIPPET_MAX_LEN {
        let truncated: String = snippet.chars().take(SNIPPET_MAX_LEN - 3).collect();
        format!("{}...", truncated)
    } else {
        snippet
    }
}

/// CSS selector locating an element.
///
/// Uses `#id` when the element has one; otherwise a chain of
/// `tag:nth-of-type(n)` steps up to the nearest ancestor with an id, or
/// up to `html`.
pub fn css_path(el: &ElementRef<'_>) -> String {
    let mut steps = Vec::new();
    let mut current = Some(*el);

    while let Some(node) = current {
        let element = node.value();
        if let Some(id) = element.id() {
            steps.push(format!("#{}", id));
            break;
        }
        if element.name() == "html" {
            steps.push("html".to_string());
            break;
        }

        let position = node
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|s| s.value().name() == element.name())
            .count()
            + 1;
        steps.push(format!("{}:nth-of-type({})", element.name(), position));

        current = node.parent().and_then(ElementRef::wrap);
    }

    steps.reverse();
    steps.join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_rejected() {
        assert!(matches!(Document::parse("   \n"), Err(EngineError::Document(_))));
        assert!(Document::parse("<p>hello</p>").is_ok());
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse("<p>x</p>").expect("parse");
        assert!(matches!(doc.select("p[[["), Err(EngineError::Selector(_))));
    }

    #[test]
    fn test_focusability() {
        let doc = Document::parse(
            r#"<a id="l1" href="/">x</a><a id="l2">x</a><button id="b" tabindex="-1">b</button>
               <div id="d" tabindex="0">d</div><input id="h" type="hidden">"#,
        )
        .expect("parse");
        let focusable = |id: &str| is_focusable(&doc.element_by_id(id).expect("element"));
        assert!(focusable("l1"));
        assert!(!focusable("l2"));
        assert!(!focusable("b"));
        assert!(focusable("d"));
        assert!(focusable("h"));
    }

    #[test]
    fn test_css_path() {
        let doc = Document::parse(
            r#"<html><body><div id="wrap"><p>a</p><p>b</p></div><ul><li>x</li></ul></body></html>"#,
        )
        .expect("parse");
        let paragraphs = doc.select("p").expect("selector");
        assert_eq!(css_path(&paragraphs[1]), "#wrap > p:nth-of-type(2)");
        let items = doc.select("li").expect("selector");
        assert_eq!(
            css_path(&items[0]),
            "html > body:nth-of-type(1) > ul:nth-of-type(1) > li:nth-of-type(1)"
        );
    }

    #[test]
    fn test_describe_truncates() {
        let long = "x".repeat(300);
        let doc = Document::parse(&format!(r#"<img src="{}">"#, long)).expect("parse");
        let img = doc.select("img").expect("selector")[0];
        let snippet = describe(&img);
        assert!(snippet.starts_with("<img src=\""));
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_LEN);
    }

    #[test]
    fn test_explicit_role_first_token() {
        let doc = Document::parse(r#"<div id="a" role="Switch checkbox">x</div>"#).expect("parse");
        let el = doc.element_by_id("a").expect("element");
        assert_eq!(explicit_role(&el).as_deref(), Some("switch"));
    }
}
