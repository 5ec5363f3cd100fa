// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markup stripping for post bodies.
//!
//! Post content arrives as rendered HTML. The index wants plain text, so
//! tags go, entities are decoded by the parser, and the bodies of elements
//! that never render as text (scripts, styles) are dropped entirely.

use scraper::{ElementRef, Html, Node};

use super::normalize::collapse_whitespace;

/// Elements whose children are not visible text.
const SKIP_CHILDREN: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Elements that end a line of text. Adjacent blocks must not glue words together.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "blockquote",
    "table", "tr", "td", "th", "section", "article", "header", "footer", "hr",
];

/// Strip HTML tags and return the visible text with whitespace collapsed.
///
/// ```
/// use postfind::util::html::strip_html;
///
/// let text = strip_html("<p>Hello <em>world</em></p><script>track()</script>");
/// assert_eq!(text, "Hello world");
/// ```
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut out);
    collapse_whitespace(&out)
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    let tag = el.value().name.local.as_ref();
    if SKIP_CHILDREN.contains(&tag) {
        return;
    }

    let is_block = BLOCK_ELEMENTS.contains(&tag);
    if is_block {
        out.push(' ');
    }

    for child in el.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            Node::Text(t) => out.push_str(&t.text),
            _ => {}
        }
    }

    if is_block {
        out.push(' ');
    }
}
