use std::sync::{Arc, RwLock};

use crate::element::{find_element, find_element_mut, Content, Element};
use crate::error::DomError;
use crate::layout::Metrics;
use crate::parse::{parse_body, parse_fragment};
use crate::serialize::inner_html;

/// A document shared between a host and the widgets bound into it.
pub type SharedDocument = Arc<RwLock<Document>>;

/// An in-memory document: a `<body>` element tree plus layout metrics and
/// focus tracking.
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
    metrics: Metrics,
    focused: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            body: Element::new("body"),
            metrics: Metrics::default(),
            focused: None,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from full-page or body-level markup.
    pub fn parse(html: &str) -> Self {
        let body = parse_body(html);
        log::trace!("parsed document with {} top-level nodes", body.child_nodes().len());
        Self {
            body,
            ..Default::default()
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(RwLock::new(self))
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.body, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.body, id)
    }

    pub fn try_get(&self, id: &str) -> Result<&Element, DomError> {
        self.get(id).ok_or_else(|| DomError::NotFound(id.to_string()))
    }

    pub fn try_get_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.get_mut(id).ok_or_else(|| DomError::NotFound(id.to_string()))
    }

    /// Parse `html` and append the resulting nodes to the body.
    pub fn append_html(&mut self, html: &str) {
        let nodes = parse_fragment(html);
        self.body.child_nodes_mut().extend(nodes);
    }

    /// Serialized content of the body.
    pub fn to_html(&self) -> String {
        inner_html(&self.body)
    }

    /// Move keyboard focus to the element with `id`.
    pub fn focus(&mut self, id: &str) -> Result<(), DomError> {
        if self.get(id).is_none() {
            return Err(DomError::NotFound(id.to_string()));
        }
        if let Some(previous) = self.focused.take() {
            if let Some(el) = self.get_mut(&previous) {
                el.focused = false;
            }
        }
        if let Some(el) = self.get_mut(id) {
            el.focused = true;
        }
        self.focused = Some(id.to_string());
        Ok(())
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Number of elements in the body subtree, excluding text nodes.
    pub fn element_count(&self) -> usize {
        fn count(el: &Element) -> usize {
            let own = usize::from(!el.is_text_node());
            match &el.content {
                Content::Children(children) => own + children.iter().map(count).sum::<usize>(),
                _ => own,
            }
        }
        count(&self.body) - 1
    }
}
