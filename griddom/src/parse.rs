//! HTML parsing into [`Element`] trees.
//!
//! Markup goes through html5ever so that entity decoding, void elements and
//! table fixups behave the way a browser would treat the same string.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::element::{Content, Element};

/// Parse a complete document and return its `<body>` element.
pub fn parse_body(html: &str) -> Element {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    match find_tag(&dom.document, "body") {
        Some(body) => convert(&body),
        None => Element::new("body"),
    }
}

/// Parse a sequence of `<tr>` markup as the content of a table body.
pub fn parse_rows(markup: &str) -> Vec<Element> {
    let body = parse_body(&format!("<table><tbody>{markup}</tbody></table>"));
    find_first(&body, "tbody")
        .map(|tbody| tbody.child_nodes().to_vec())
        .unwrap_or_default()
}

/// Parse markup placed inside a `<div>` and return the resulting children.
pub fn parse_fragment(markup: &str) -> Vec<Element> {
    let body = parse_body(markup);
    match body.content {
        Content::Children(children) => children,
        Content::Text(text) => vec![Element::text_node(text)],
        Content::None => Vec::new(),
    }
}

fn find_first<'a>(root: &'a Element, tag: &str) -> Option<&'a Element> {
    if root.tag == tag {
        return Some(root);
    }
    root.child_nodes().iter().find_map(|c| find_first(c, tag))
}

fn find_tag(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_tag(child, tag))
}

fn convert(handle: &Handle) -> Element {
    let mut element = match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut element = Element::new(&*name.local);
            for attr in attrs.borrow().iter() {
                element.set_attr(&*attr.name.local, &*attr.value);
            }
            element
        }
        _ => Element::new("#fragment"),
    };

    let mut children = Vec::new();
    let mut texts = Vec::new();
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Element { .. } => children.push(convert(child)),
            NodeData::Text { ref contents } => {
                let text = contents.borrow().to_string();
                texts.push(text.clone());
                if !text.trim().is_empty() {
                    children.push(Element::text_node(text));
                }
            }
            _ => {}
        }
    }

    element.content = if children.iter().all(Element::is_text_node) {
        let text: String = texts.concat();
        if text.is_empty() {
            Content::None
        } else {
            Content::Text(text)
        }
    } else {
        Content::Children(children)
    };
    element
}
