use std::collections::BTreeMap;

use super::Content;

/// Tags that never carry content and serialize without a closing tag.
pub const VOID_TAGS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta"];

/// Tag used for bare text nodes that sit next to element siblings.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub tag: String,
    pub id: Option<String>,

    // Markup attributes
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Inline style declarations in source order.
    pub style: Vec<(String, String)>,

    // Content
    pub content: Content,

    // Interaction (set by widgets, never serialized)
    pub clickable: bool,
    pub draggable: bool,
    pub droppable: bool,
    pub resizable: bool,
    /// Whether a widget controller has claimed this element.
    pub bound: bool,

    // State
    pub focused: bool,
    /// Horizontal and vertical scroll offset in pixels.
    pub scroll_offset: (u32, u32),
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// A bare text node, used when text is mixed with element siblings.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            content: Content::Text(text.into()),
            ..Default::default()
        }
    }

    pub fn is_text_node(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn style_decl(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Element children, or an empty slice for text/empty content.
    pub fn child_nodes(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Mutable element children. Text content is discarded when the element
    /// is switched to hold children.
    pub fn child_nodes_mut(&mut self) -> &mut Vec<Element> {
        if !matches!(self.content, Content::Children(_)) {
            self.content = Content::Children(Vec::new());
        }
        match &mut self.content {
            Content::Children(children) => children,
            _ => unreachable!("content was just set to children"),
        }
    }

    pub fn child_at(&self, index: usize) -> Option<&Element> {
        self.child_nodes().get(index)
    }

    pub fn child_at_mut(&mut self, index: usize) -> Option<&mut Element> {
        match &mut self.content {
            Content::Children(children) => children.get_mut(index),
            _ => None,
        }
    }

    // Classes
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        for c in class.split_whitespace() {
            if !self.has_class(c) {
                self.classes.push(c.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        for c in class.split_whitespace() {
            self.classes.retain(|existing| existing != c);
        }
    }

    pub fn set_class_enabled(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // Attributes
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match name.as_str() {
            "id" => self.id = Some(value.into()),
            "class" => {
                self.classes.clear();
                self.add_class(&value.into());
            }
            "style" => self.set_style_text(&value.into()),
            _ => {
                self.attrs.insert(name, value.into());
            }
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    // Inline style
    pub fn style_value(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Pixel value of a style property such as `width: 98px`.
    pub fn style_px(&self, name: &str) -> Option<u32> {
        let value = self.style_value(name)?;
        let number = value.trim().trim_end_matches("px").trim();
        number
            .parse::<f64>()
            .ok()
            .filter(|v| *v >= 0.0)
            .map(|v| v.round() as u32)
    }

    pub fn set_style(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.style.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.style.push((name, value)),
        }
    }

    pub fn set_style_px(&mut self, name: impl Into<String>, px: u32) {
        self.set_style(name, format!("{px}px"));
    }

    pub fn remove_style(&mut self, name: &str) {
        self.style.retain(|(n, _)| n != name);
    }

    /// Replace all inline declarations with those parsed from `text`.
    pub fn set_style_text(&mut self, text: &str) {
        self.style.clear();
        for decl in text.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    self.set_style(name.to_ascii_lowercase(), value.trim());
                }
            }
        }
    }

    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(n, v)| format!("{n}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn is_hidden(&self) -> bool {
        self.style_value("display") == Some("none")
    }

    // Text
    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(s) => out.push_str(s),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.content = if text.is_empty() {
            Content::None
        } else {
            Content::Text(text)
        };
    }
}
