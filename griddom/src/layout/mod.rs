//! Block layout for grid-shaped documents.
//!
//! There is no text measurement: every leaf occupies one line, table rows
//! are as tall as their tallest cell and all other containers stack their
//! children vertically. Explicit `height` declarations always win and
//! `display: none` collapses an element to zero.

use crate::element::{Content, Element};

/// Default pixel height of one line of content.
pub const DEFAULT_LINE_HEIGHT: u32 = 20;

/// Measurement settings shared by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub line_height: u32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl Metrics {
    pub fn new(line_height: u32) -> Self {
        Self { line_height }
    }
}

/// Outer height of an element in pixels.
pub fn outer_height(element: &Element, metrics: &Metrics) -> u32 {
    if element.is_hidden() {
        return 0;
    }
    if let Some(height) = element.style_px("height") {
        return height;
    }
    content_height(element, metrics)
}

/// Height of the element's content, ignoring its own explicit height.
pub fn content_height(element: &Element, metrics: &Metrics) -> u32 {
    match &element.content {
        Content::Children(children) if !children.is_empty() => {
            if element.tag == "tr" {
                children
                    .iter()
                    .map(|c| outer_height(c, metrics))
                    .max()
                    .unwrap_or(0)
            } else {
                children.iter().map(|c| outer_height(c, metrics)).sum()
            }
        }
        // Sections without rows collapse; leaves take one line.
        _ if matches!(element.tag.as_str(), "tbody" | "thead" | "table") => 0,
        _ => metrics.line_height,
    }
}

/// Vertical offset of the child at `index` from the top of `parent`'s content.
pub fn offset_of_child(parent: &Element, index: usize, metrics: &Metrics) -> u32 {
    parent
        .child_nodes()
        .iter()
        .take(index)
        .map(|c| outer_height(c, metrics))
        .sum()
}
