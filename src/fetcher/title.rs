// src/fetcher/title.rs
// =============================================================================
// This module pulls the page title out of an HTML document.
//
// We use the `scraper` crate which:
// - Parses HTML into a tree (built on html5ever, Mozilla's HTML parser)
// - Tolerates broken markup the same way a browser does
//
// We don't use a CSS selector here: we walk the tree ourselves in document
// order and stop at the first <title> that actually has content.
//
// Rust concepts:
// - Generics with trait bounds: extract_title accepts anything that is Read
// - Iterators: descendants() walks the tree lazily, find() stops early
// =============================================================================

use scraper::{ElementRef, Html, Node};
use std::io::Read;

use super::error::ParseError;

/// Returned when a document has no usable `<title>` element.
pub const NO_TITLE: &str = "No Title Found";

// Reads an HTML document from `body` and returns its title
//
// Parameters:
//   body: any byte stream (a &[u8] works, since &[u8] implements Read)
//
// Returns: the text of the first <title> element, or NO_TITLE
//
// Only a failing stream is an error. Invalid UTF-8 is replaced rather than
// rejected, and malformed or empty documents simply have no title.
pub fn extract_title<R: Read>(mut body: R) -> Result<String, ParseError> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes)
        .map_err(|e| ParseError::Read(e.to_string()))?;

    let html = String::from_utf8_lossy(&bytes);
    let document = Html::parse_document(&html);

    Ok(find_title(&document).unwrap_or_else(|| NO_TITLE.to_string()))
}

// Depth-first, pre-order search for the first <title> element with at
// least one child. That element is the answer, whatever its first child is:
// - text: returned untouched
// - an element (e.g. <b> inside an svg <title>): its descendant text joined
// - a comment: the comment's text, same as a text node's data
// Anything else yields an empty string, which becomes NO_TITLE.
//
// descendants() yields nodes in document order and find() stops at the first
// match, so later <title> elements are never visited.
fn find_title(document: &Html) -> Option<String> {
    let title = document.tree.root().descendants().find(|node| {
        let is_title = matches!(node.value(), Node::Element(element) if element.name() == "title");
        is_title && node.has_children()
    })?;

    let child = title.first_child()?;
    let text = match child.value() {
        Node::Text(text) => (**text).to_owned(),
        Node::Comment(comment) => (**comment).to_owned(),
        Node::Element(_) => ElementRef::wrap(child)
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default(),
        _ => String::new(),
    };

    Some(text).filter(|text| !text.is_empty())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why take `impl Read` instead of &str?
//    - The fetcher hands us raw bytes, not text
//    - Taking a reader means the "couldn't read the stream" case lives here,
//      next to the parsing, instead of being lost in the network code
//
// 2. What is String::from_utf8_lossy?
//    - Converts bytes to text, replacing invalid sequences with U+FFFD
//    - Returns a Cow<str>: borrowed if the bytes were already valid UTF-8
//
// 3. What does the `?` after find() do?
//    - find_title returns Option<String>
//    - `?` on an Option returns None early when no <title> was found
//    - The caller turns that None into NO_TITLE
// -----------------------------------------------------------------------------
