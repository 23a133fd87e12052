//! Markup generation for grids.
//!
//! Rendering is a pure function of column metadata, rows and the selected
//! index. The same row markup is used for the full document on the server
//! and for fragments the client inserts while patching a live grid.
//!
//! Structure:
//!
//! ```text
//! div#id.Grid                      root, carries the __cfg snapshot
//! ├── div.GridHeader > table > thead > tr > th* th.spacer
//! └── div.GridValues > table > tbody > tr.GridRowEven|GridRowOdd*
//! ```

use std::fmt::Write;

use griddom::Element;
use serde_json::Value;

use crate::config::{BORDER_SIZE, Column, GridConfig};
use crate::error::GridError;
use crate::position::{Position, create_style};
use crate::row_store::RowStore;
use crate::snapshot::{CONFIG_ATTR, SnapshotCodec, escape};

pub const DIV_CLASS: &str = "Grid ui-widget-content";
pub const DISABLED_DIV_CLASS: &str = "DisabledGrid";
pub const SPACER_TH_CLASS: &str = "spacer";
pub const HEADER_DIV_CLASS: &str = "GridHeader";
pub const HEADER_TABLE_CLASS: &str = "GridHeader";
pub const VALUES_DIV_CLASS: &str = "GridValues";
pub const VALUES_TABLE_CLASS: &str = "GridValues";
pub const EVEN_ROW_CLASS: &str = "GridRowEven";
pub const ODD_ROW_CLASS: &str = "GridRowOdd";
pub const SELECTED_ROW_CLASS: &str = "ui-state-highlight";
pub const ROW_HOVER_CLASS: &str = "DropHover";
pub const CURRENT_DRAGGING_ROW_CLASS: &str = "CurrentDraggingRow";

/// Row attribute holding the JSON-encoded payload.
pub const DATA_ATTR: &str = "__data";

/// Transparent 1x1 image used for empty cells and titles.
pub const BLANK_IMAGE_SRC: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==";

/// Placeholder keeping empty cells at full line height.
pub const BLANK_IMAGE_HTML: &str = "<img class=\"blank\" alt=\"\" src=\"data:image/gif;base64,R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==\">";

/// The placeholder as a document element.
pub fn blank_image() -> Element {
    Element::new("img")
        .class("blank")
        .attr("alt", "")
        .attr("src", BLANK_IMAGE_SRC)
}

/// Striping class for a row at `index`.
pub fn parity_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        EVEN_ROW_CLASS
    } else {
        ODD_ROW_CLASS
    }
}

/// Width of the root and of both inner blocks for an overall grid width.
pub fn inner_width(width: u32) -> u32 {
    width.saturating_sub(2 * BORDER_SIZE)
}

/// Renders grid markup for a fixed set of columns.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    columns: &'a [Column],
}

impl<'a> Renderer<'a> {
    pub fn new(columns: &'a [Column]) -> Self {
        Self { columns }
    }

    /// Markup for a single row.
    pub fn render_row(
        &self,
        cells: &[String],
        even: bool,
        selected: bool,
        payload: Option<&Value>,
    ) -> String {
        let mut out = String::new();
        self.write_row(&mut out, cells, even, selected, payload);
        out
    }

    /// Markup for every row of `rows`, striped by position.
    pub fn render_rows(&self, rows: &RowStore, selected: Option<usize>) -> String {
        let mut out = String::new();
        for (index, row) in rows.iter().enumerate() {
            self.write_row(
                &mut out,
                &row.cells,
                index % 2 == 0,
                selected == Some(index),
                row.payload.as_ref(),
            );
        }
        out
    }

    /// Markup for the header block alone.
    pub fn render_header(&self, width: u32, visible: bool) -> String {
        let mut out = String::new();
        let style = if visible {
            format!("width: {}px", inner_width(width))
        } else {
            format!("width: {}px; display: none", inner_width(width))
        };
        let _ = write!(
            out,
            "<div class=\"{HEADER_DIV_CLASS}\" style=\"{style}\"><table cellpadding=\"0\" cellspacing=\"0\" class=\"{HEADER_TABLE_CLASS}\"><thead><tr>"
        );
        for column in self.columns {
            out.push_str("<th");
            write_class_attr(&mut out, &column.class);
            let _ = write!(out, "><div style=\"width: {}px\"><div>", column.width);
            write_text_or_blank(&mut out, &column.title);
            out.push_str("</div></div></th>");
        }
        let _ = write!(
            out,
            "<th class=\"{SPACER_TH_CLASS}\"><div>&nbsp;</div></th></tr></thead></table></div>"
        );
        out
    }

    /// Markup for the content of the root element: header and values blocks.
    pub fn render_inner(
        &self,
        width: u32,
        headers_visible: bool,
        rows: &RowStore,
        selected: Option<usize>,
    ) -> String {
        let mut out = self.render_header(width, headers_visible);
        let _ = write!(
            out,
            "<div class=\"{VALUES_DIV_CLASS}\" style=\"width: {}px\"><table cellpadding=\"0\" cellspacing=\"0\" class=\"{VALUES_TABLE_CLASS}\"><tbody>",
            inner_width(width)
        );
        out.push_str(&self.render_rows(rows, selected));
        out.push_str("</tbody></table></div>");
        out
    }

    fn write_row(
        &self,
        out: &mut String,
        cells: &[String],
        even: bool,
        selected: bool,
        payload: Option<&Value>,
    ) {
        out.push_str("<tr");
        if let Some(payload) = payload.filter(|p| !p.is_null()) {
            let _ = write!(out, " {DATA_ATTR}=\"{}\"", escape(&payload.to_string()));
        }
        let _ = write!(
            out,
            " class=\"{}{}\">",
            if even { EVEN_ROW_CLASS } else { ODD_ROW_CLASS },
            if selected {
                format!(" {SELECTED_ROW_CLASS}")
            } else {
                String::new()
            }
        );
        for (col, column) in self.columns.iter().enumerate() {
            out.push_str("<td");
            write_class_attr(out, &column.class);
            let _ = write!(out, "><div style=\"width: {}px\"><div>", column.width);
            write_text_or_blank(out, cells.get(col).map(String::as_str).unwrap_or(""));
            out.push_str("</div></div></td>");
        }
        out.push_str("</tr>");
    }
}

/// Render the complete root element of a grid.
pub fn render_full(
    id: &str,
    config: &GridConfig,
    position: Position,
    rows: &RowStore,
) -> Result<String, GridError> {
    if id.is_empty() {
        return Err(GridError::configuration("must set id before render"));
    }

    let renderer = Renderer::new(&config.columns);
    let style = create_style(position, Some(inner_width(config.width)), None);
    let mut out = String::new();
    let _ = write!(out, "<div id=\"{}\" class=\"{DIV_CLASS}", escape(id));
    if !config.enabled {
        let _ = write!(out, " {DISABLED_DIV_CLASS}");
    }
    let _ = write!(out, "\" style=\"{style}\"");
    if config.enabled {
        let _ = write!(out, " tabindex=\"{}\"", config.tab_index);
    }
    let _ = write!(out, " {CONFIG_ATTR}=\"{}\">", SnapshotCodec::encode(config));
    out.push_str(&renderer.render_inner(
        config.width,
        config.col_headers_visible,
        rows,
        config.selected_row_index,
    ));
    out.push_str("</div>");
    Ok(out)
}

fn write_class_attr(out: &mut String, class: &str) {
    if !class.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(class));
    }
}

fn write_text_or_blank(out: &mut String, text: &str) {
    if text.is_empty() {
        out.push_str(BLANK_IMAGE_HTML);
    } else {
        out.push_str(&escape(text));
    }
}
