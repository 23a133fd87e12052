//! Snapshot encoding for the embedded configuration attribute.
//!
//! The wire form is a flat JSON object with parallel column arrays, written
//! into the `__cfg` attribute of the grid's root element:
//!
//! ```text
//! {"colTitles":["Name"],"colWidths":[120],"colClasses":[""],"width":300,
//!  "height":300,"tabIndex":0,"numRows":2,"enabled":true,
//!  "colHeadersVisible":true,"enableDragDrop":false,"selectedRowIndex":-1}
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{Column, GridConfig};
use crate::error::GridError;

/// Name of the root attribute holding the encoded snapshot.
pub const CONFIG_ATTR: &str = "__cfg";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotWire {
    col_titles: Vec<String>,
    col_widths: Vec<u32>,
    col_classes: Vec<String>,
    width: u32,
    height: u32,
    tab_index: i32,
    num_rows: usize,
    enabled: bool,
    col_headers_visible: bool,
    enable_drag_drop: bool,
    selected_row_index: i64,
}

impl From<&GridConfig> for SnapshotWire {
    fn from(config: &GridConfig) -> Self {
        Self {
            col_titles: config.columns.iter().map(|c| c.title.clone()).collect(),
            col_widths: config.columns.iter().map(|c| c.width).collect(),
            col_classes: config.columns.iter().map(|c| c.class.clone()).collect(),
            width: config.width,
            height: config.height,
            tab_index: config.tab_index,
            num_rows: config.num_rows,
            enabled: config.enabled,
            col_headers_visible: config.col_headers_visible,
            enable_drag_drop: config.enable_drag_drop,
            selected_row_index: config.selected_row_index.map_or(-1, |i| i as i64),
        }
    }
}

impl TryFrom<SnapshotWire> for GridConfig {
    type Error = GridError;

    fn try_from(wire: SnapshotWire) -> Result<Self, GridError> {
        let count = wire.col_titles.len();
        if wire.col_widths.len() != count || wire.col_classes.len() != count {
            return Err(GridError::decode(format!(
                "column arrays disagree: {} titles, {} widths, {} classes",
                count,
                wire.col_widths.len(),
                wire.col_classes.len()
            )));
        }

        let selected_row_index = match wire.selected_row_index {
            -1 => None,
            i if i >= 0 => Some(i as usize),
            i => return Err(GridError::decode(format!("invalid selected row index {i}"))),
        };

        let columns = wire
            .col_titles
            .into_iter()
            .zip(wire.col_widths)
            .zip(wire.col_classes)
            .map(|((title, width), class)| Column { title, width, class })
            .collect();

        let config = GridConfig {
            columns,
            width: wire.width,
            height: wire.height,
            tab_index: wire.tab_index,
            num_rows: wire.num_rows,
            enabled: wire.enabled,
            col_headers_visible: wire.col_headers_visible,
            enable_drag_drop: wire.enable_drag_drop,
            selected_row_index,
        };
        config
            .validate()
            .map_err(|e| GridError::decode(format!("invalid snapshot: {e}")))?;
        Ok(config)
    }
}

/// Converts grid configurations to and from their embedded form.
pub struct SnapshotCodec;

impl SnapshotCodec {
    /// Serialize a configuration to JSON. Output is deterministic: fields are
    /// always written in the same order.
    pub fn to_json(config: &GridConfig) -> String {
        // Serializing plain strings, numbers and bools cannot fail.
        serde_json::to_string(&SnapshotWire::from(config)).unwrap_or_default()
    }

    /// Parse a configuration from JSON, as read back from the attribute value
    /// of a parsed document.
    pub fn from_json(json: &str) -> Result<GridConfig, GridError> {
        let wire: SnapshotWire = serde_json::from_str(json)?;
        GridConfig::try_from(wire)
    }

    /// Encode a configuration for embedding inside a double-quoted HTML
    /// attribute.
    pub fn encode(config: &GridConfig) -> String {
        escape(&Self::to_json(config))
    }

    /// Decode the escaped form produced by [`encode`](Self::encode).
    pub fn decode(encoded: &str) -> Result<GridConfig, GridError> {
        Self::from_json(&unescape(encoded)?)
    }
}

/// Escape text for HTML attribute values and text content.
pub fn escape(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// References produced by [`escape`], paired with the character each stands
/// for.
const ESCAPES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#x27;", '\''),
    ("&#x2f;", '/'),
];

/// Reverse [`escape`].
///
/// Only the six references `v_htmlescape` emits are understood. Anything
/// else after a `&` is a decode error; markup from other sources should go
/// through `griddom::parse`, which decodes attributes the way a browser does.
pub fn unescape(text: &str) -> Result<String, GridError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let (reference, ch) = ESCAPES
            .iter()
            .find(|(reference, _)| rest.starts_with(reference))
            .ok_or_else(|| {
                let end = rest.find(';').map_or(rest.len(), |semi| semi + 1);
                GridError::decode(format!("unknown character reference {}", &rest[..end]))
            })?;
        out.push(*ch);
        rest = &rest[reference.len()..];
    }
    out.push_str(rest);
    Ok(out)
}
