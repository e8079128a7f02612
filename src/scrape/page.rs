//! Parsed page content
//!
//! A thin layer over `scraper` exposing the three queries the scrape core
//! needs: find all fragments matching a selector, the trimmed text of a
//! fragment, and a named attribute of a fragment.

use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

/// A fetched page, parsed once and queried by selector
pub struct Page {
    document: Html,
}

impl Page {
    /// Parses an HTML document
    ///
    /// Parsing is lenient; malformed markup never fails, it just yields
    /// fewer matches.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// All fragments matching `selector`, in document order
    ///
    /// Matches borrow the page only, so they outlive the selector.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.document.select(selector)
    }

    /// Number of fragments matching `selector`
    pub fn count(&self, selector: &Selector) -> usize {
        self.select(selector).count()
    }

    /// Trimmed text of every fragment matching `selector`
    pub fn texts(&self, selector: &Selector) -> Vec<String> {
        self.select(selector).map(text_of).collect()
    }
}

/// Trimmed text content of a fragment
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed, concatenated text of every descendant matching `selector`
///
/// Returns an empty string when nothing matches, so a missing field reads
/// the same as an empty one.
pub fn child_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Value of a named attribute on a fragment
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Parses a selector that is known at compile time
///
/// # Panics
///
/// Panics if `css` is not a valid selector. Only call this with literals.
pub fn static_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}
