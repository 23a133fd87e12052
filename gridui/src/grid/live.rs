//! Backend keeping a document subtree in sync with the grid.

use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

use griddom::layout::{content_height, offset_of_child, outer_height};
use griddom::parse::{parse_fragment, parse_rows};
use griddom::{child_at_y, reveal_offset, span_at_x, Content, Document, Element, SharedDocument};
use log::{debug, trace};

use super::backend::{GridBackend, Hit, RenderStats, Wiring};
use crate::config::{BORDER_SIZE, GridConfig};
use crate::error::GridError;
use crate::position::{Position, apply_position};
use crate::render::{
    DATA_ATTR, DISABLED_DIV_CLASS, EVEN_ROW_CLASS, HEADER_DIV_CLASS, ODD_ROW_CLASS,
    VALUES_DIV_CLASS, blank_image, inner_width, parity_class,
};
use crate::row_store::{RowData, RowStore};
use crate::snapshot::CONFIG_ATTR;

/// Live half of an attached grid.
#[derive(Debug)]
pub struct LiveBackend {
    doc: SharedDocument,
    root: String,
    /// Header block height measured at attach.
    header_height: u32,
    stats: RenderStats,
}

impl LiveBackend {
    /// Bind to the rendered grid `id` inside `doc`.
    ///
    /// Validates the subtree against `config`, recovers the rendered rows,
    /// wires interaction flags and claims the root element. Nothing in the
    /// document is modified unless every check passes.
    pub fn attach(
        doc: SharedDocument,
        id: &str,
        config: &GridConfig,
        wiring: Wiring,
    ) -> Result<(Self, RowStore), GridError> {
        let (rows, header_height) = {
            let mut guard = doc.write().unwrap_or_else(PoisonError::into_inner);
            let metrics = guard.metrics();
            let root = guard.try_get_mut(id)?;
            if root.bound {
                return Err(GridError::DoubleAttach(format!(
                    "element '{id}' is already bound to a grid"
                )));
            }

            let rows = recover_rows(tbody(root)?)?;
            if rows.len() != config.num_rows {
                return Err(GridError::decode(format!(
                    "snapshot declares {} rows but '{id}' renders {}",
                    config.num_rows,
                    rows.len()
                )));
            }
            header_row(root)?;

            let header = section_mut(root, HEADER_DIV_CLASS)?;
            let header_height = content_height(header, &metrics);
            set_hidden(header, !config.col_headers_visible);

            // The snapshot is consumed exactly once.
            root.remove_attr(CONFIG_ATTR);
            root.bound = true;
            (rows, header_height)
        };

        let mut backend = Self {
            doc,
            root: id.to_string(),
            header_height,
            stats: RenderStats::default(),
        };

        backend.wire(wiring)?;
        backend.set_height(config.height, config.col_headers_visible)?;
        debug!(
            "attached grid '{id}': {} rows, header height {}",
            rows.len(),
            backend.header_height
        );
        Ok((backend, rows))
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    fn read_doc(&self) -> RwLockReadGuard<'_, Document> {
        self.doc.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_doc(&self) -> RwLockWriteGuard<'_, Document> {
        self.doc.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_root<R>(&self, f: impl FnOnce(&Element, &griddom::Metrics) -> Result<R, GridError>) -> Result<R, GridError> {
        let guard = self.read_doc();
        let metrics = guard.metrics();
        let root = guard.try_get(&self.root)?;
        f(root, &metrics)
    }

    fn with_root_mut<R>(
        &mut self,
        f: impl FnOnce(&mut Element, &griddom::Metrics) -> Result<R, GridError>,
    ) -> Result<R, GridError> {
        let mut guard = self.write_doc();
        let metrics = guard.metrics();
        let root = guard.try_get_mut(&self.root)?;
        f(root, &metrics)
    }

    fn with_rows_mut<R>(&mut self, f: impl FnOnce(&mut Vec<Element>) -> Result<R, GridError>) -> Result<R, GridError> {
        self.with_root_mut(|root, _| f(tbody_mut(root)?.child_nodes_mut()))
    }

    /// Set interaction flags on rows, the values block and header cells.
    fn wire(&mut self, wiring: Wiring) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            let headers = header_row_mut(root)?.child_nodes_mut();
            let last = headers.len().saturating_sub(1);
            for (index, th) in headers.iter_mut().enumerate() {
                th.resizable = index < last;
            }

            let values = section_mut(root, VALUES_DIV_CLASS)?;
            values.droppable = wiring.drop_targets;
            let rows = descend_mut(values, &["table", "tbody"])
                .ok_or_else(|| GridError::decode("values block has no table body"))?;
            for (index, tr) in rows.child_nodes_mut().iter_mut().enumerate() {
                tr.clickable = true;
                tr.droppable = wiring.drop_targets;
                tr.draggable = wiring.drop_targets && wiring.selected == Some(index);
            }
            Ok(())
        })?;
        self.stats.rewires += 1;
        trace!("rewired grid '{}'", self.root);
        Ok(())
    }

    fn row_mut<'a>(rows: &'a mut [Element], index: usize) -> Result<&'a mut Element, GridError> {
        let len = rows.len();
        rows.get_mut(index).ok_or_else(|| GridError::index(index, len))
    }
}

impl GridBackend for LiveBackend {
    fn is_live(&self) -> bool {
        true
    }

    fn stats(&self) -> RenderStats {
        self.stats
    }

    fn row_count(&self) -> Option<usize> {
        self.with_root(|root, _| Ok(tbody(root)?.child_nodes().len())).ok()
    }

    fn row_texts(&self, index: usize) -> Option<Vec<String>> {
        self.with_root(|root, _| {
            let tr = tbody(root)?
                .child_at(index)
                .ok_or_else(|| GridError::index(index, 0))?;
            Ok(tr.child_nodes().iter().map(Element::text_content).collect())
        })
        .ok()
    }

    fn hit(&self, x: i32, y: i32, widths: &[u32]) -> Hit {
        self.with_root(|root, metrics| {
            let width = root.style_px("width").unwrap_or(u32::MAX);
            if x < 0 || y < 0 || x as u32 >= width {
                return Ok(Hit::Outside);
            }

            let header = section(root, HEADER_DIV_CLASS)?;
            let header_h = i64::from(outer_height(header, metrics));
            let (x, y) = (i64::from(x), i64::from(y));
            if y < header_h {
                let col = span_at_x(widths, x + i64::from(header.scroll_offset.0));
                return Ok(col.map_or(Hit::Outside, |col| Hit::Header { col }));
            }

            let values = section(root, VALUES_DIV_CLASS)?;
            let values_h = i64::from(outer_height(values, metrics));
            if y >= header_h + values_h {
                return Ok(Hit::Outside);
            }
            let (scroll_x, scroll_y) = values.scroll_offset;
            let rows = tbody(root)?;
            Ok(
                match child_at_y(rows, y - header_h + i64::from(scroll_y), metrics) {
                    Some(row) => Hit::Row {
                        row,
                        col: span_at_x(widths, x + i64::from(scroll_x)),
                    },
                    None => Hit::ValuesArea,
                },
            )
        })
        .unwrap_or(Hit::Outside)
    }

    fn insert_row(&mut self, index: usize, markup: &str, wiring: Wiring) -> Result<(), GridError> {
        let mut row = parse_rows(markup)
            .into_iter()
            .next()
            .ok_or_else(|| GridError::decode("row markup produced no row"))?;
        row.clickable = true;
        row.droppable = wiring.drop_targets;
        self.with_rows_mut(|rows| {
            if index > rows.len() {
                return Err(GridError::index(index, rows.len()));
            }
            rows.insert(index, row);
            Ok(())
        })?;
        self.stats.row_patches += 1;
        trace!("inserted row {index} into '{}'", self.root);
        Ok(())
    }

    fn update_row(&mut self, index: usize, cells: &[String]) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            let tr = Self::row_mut(rows, index)?;
            for (col, td) in tr.child_nodes_mut().iter_mut().enumerate() {
                if let Some(inner) = descend_mut(td, &["div", "div"]) {
                    set_cell_text(inner, cells.get(col).map(String::as_str).unwrap_or(""));
                }
            }
            Ok(())
        })?;
        self.stats.row_patches += 1;
        trace!("updated row {index} of '{}'", self.root);
        Ok(())
    }

    fn remove_row(&mut self, index: usize) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            Self::row_mut(rows, index)?;
            rows.remove(index);
            Ok(())
        })?;
        self.stats.row_patches += 1;
        trace!("removed row {index} from '{}'", self.root);
        Ok(())
    }

    fn clear_rows(&mut self) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            rows.clear();
            Ok(())
        })?;
        self.stats.row_patches += 1;
        Ok(())
    }

    fn replace_rows(&mut self, markup: &str, wiring: Wiring) -> Result<(), GridError> {
        let new_rows = parse_rows(markup);
        let count = new_rows.len();
        self.with_rows_mut(|rows| {
            *rows = new_rows;
            Ok(())
        })?;
        self.stats.full_renders += 1;
        debug!("rendered {count} rows into '{}'", self.root);
        self.wire(wiring)
    }

    fn move_row(&mut self, from: usize, to: usize) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            Self::row_mut(rows, from)?;
            let row = rows.remove(from);
            if to > rows.len() {
                rows.insert(from, row);
                return Err(GridError::index(to, rows.len() + 1));
            }
            rows.insert(to, row);
            Ok(())
        })?;
        self.stats.row_patches += 1;
        trace!("moved row {from} to {to} in '{}'", self.root);
        Ok(())
    }

    fn toggle_parity_from(&mut self, start: usize) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            for (index, tr) in rows.iter_mut().enumerate().skip(start) {
                if tr.has_class(EVEN_ROW_CLASS) {
                    tr.remove_class(EVEN_ROW_CLASS);
                    tr.add_class(ODD_ROW_CLASS);
                } else if tr.has_class(ODD_ROW_CLASS) {
                    tr.remove_class(ODD_ROW_CLASS);
                    tr.add_class(EVEN_ROW_CLASS);
                } else {
                    tr.add_class(parity_class(index));
                }
            }
            Ok(())
        })
    }

    fn set_parity_range(&mut self, first: usize, last: usize) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            for (index, tr) in rows.iter_mut().enumerate().take(last + 1).skip(first) {
                tr.remove_class(EVEN_ROW_CLASS);
                tr.remove_class(ODD_ROW_CLASS);
                tr.add_class(parity_class(index));
            }
            Ok(())
        })
    }

    fn set_row_class(&mut self, index: usize, class: &str, enabled: bool) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            Self::row_mut(rows, index)?.set_class_enabled(class, enabled);
            Ok(())
        })
    }

    fn clear_row_class(&mut self, class: &str) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            for tr in rows.iter_mut() {
                tr.remove_class(class);
            }
            Ok(())
        })
    }

    fn set_row_draggable(&mut self, index: usize, draggable: bool) -> Result<(), GridError> {
        self.with_rows_mut(|rows| {
            Self::row_mut(rows, index)?.draggable = draggable;
            Ok(())
        })
    }

    fn set_drop_targets(&mut self, enabled: bool) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            let values = section_mut(root, VALUES_DIV_CLASS)?;
            values.droppable = enabled;
            for tr in tbody_mut(root)?.child_nodes_mut() {
                tr.droppable = enabled;
            }
            Ok(())
        })
    }

    fn ensure_visible(&mut self, index: usize) -> Result<(), GridError> {
        self.with_root_mut(|root, metrics| {
            let rows = tbody(root)?;
            let row = rows
                .child_at(index)
                .ok_or_else(|| GridError::index(index, rows.child_nodes().len()))?;
            let top = offset_of_child(rows, index, metrics);
            let height = outer_height(row, metrics);

            let values = section_mut(root, VALUES_DIV_CLASS)?;
            let viewport = outer_height(values, metrics);
            let scroll_top = values.scroll_offset.1;
            values.scroll_offset.1 = reveal_offset(scroll_top, top, height, viewport);
            Ok(())
        })
    }

    fn set_column_width(&mut self, col: usize, width: u32) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            if let Some(th) = header_row_mut(root)?.child_at_mut(col) {
                if let Some(div) = descend_mut(th, &["div"]) {
                    div.set_style_px("width", width);
                }
            }
            for tr in tbody_mut(root)?.child_nodes_mut() {
                if let Some(div) = tr.child_at_mut(col).and_then(|td| descend_mut(td, &["div"])) {
                    div.set_style_px("width", width);
                }
            }
            let scroll_x = section(root, VALUES_DIV_CLASS)?.scroll_offset.0;
            section_mut(root, HEADER_DIV_CLASS)?.scroll_offset.0 = scroll_x;
            Ok(())
        })
    }

    fn set_column_title(&mut self, col: usize, title: &str) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            let len = header_row(root)?.child_nodes().len().saturating_sub(1);
            let th = header_row_mut(root)?
                .child_at_mut(col)
                .filter(|_| col < len)
                .ok_or_else(|| GridError::index(col, len))?;
            if let Some(inner) = descend_mut(th, &["div", "div"]) {
                set_cell_text(inner, title);
            }
            Ok(())
        })
    }

    fn set_column_class(&mut self, col: usize, old: &str, new: &str) -> Result<(), GridError> {
        fn swap(cell: &mut Element, old: &str, new: &str) {
            if !old.is_empty() {
                cell.remove_class(old);
            }
            if !new.is_empty() {
                cell.add_class(new);
            }
        }

        self.with_root_mut(|root, _| {
            if let Some(th) = header_row_mut(root)?.child_at_mut(col) {
                swap(th, old, new);
            }
            for tr in tbody_mut(root)?.child_nodes_mut() {
                if let Some(td) = tr.child_at_mut(col) {
                    swap(td, old, new);
                }
            }
            Ok(())
        })
    }

    fn replace_inner(&mut self, markup: &str, wiring: Wiring) -> Result<(), GridError> {
        let nodes = parse_fragment(markup);
        let header_height = self.with_root_mut(|root, metrics| {
            *root.child_nodes_mut() = nodes;
            let header = section(root, HEADER_DIV_CLASS)?;
            Ok(content_height(header, metrics))
        })?;
        self.header_height = header_height;
        self.stats.full_renders += 1;
        debug!("re-rendered skeleton of '{}'", self.root);
        self.wire(wiring)
    }

    fn set_width(&mut self, width: u32) -> Result<(), GridError> {
        let inner = inner_width(width);
        self.with_root_mut(|root, _| {
            root.set_style_px("width", inner);
            section_mut(root, HEADER_DIV_CLASS)?.set_style_px("width", inner);
            section_mut(root, VALUES_DIV_CLASS)?.set_style_px("width", inner);
            Ok(())
        })
    }

    fn set_height(&mut self, height: u32, headers_visible: bool) -> Result<(), GridError> {
        let header = if headers_visible { self.header_height } else { 0 };
        let values_height = height.saturating_sub(2 * BORDER_SIZE + header);
        self.with_root_mut(|root, _| {
            section_mut(root, VALUES_DIV_CLASS)?.set_style_px("height", values_height);
            Ok(())
        })
    }

    fn set_headers_visible(&mut self, visible: bool, height: u32) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            set_hidden(section_mut(root, HEADER_DIV_CLASS)?, !visible);
            Ok(())
        })?;
        self.set_height(height, visible)
    }

    fn set_enabled(&mut self, enabled: bool, tab_index: i32) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            root.set_class_enabled(DISABLED_DIV_CLASS, !enabled);
            if enabled {
                root.set_attr("tabindex", tab_index.to_string());
            } else {
                root.remove_attr("tabindex");
            }
            Ok(())
        })
    }

    fn set_tab_index(&mut self, tab_index: i32) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            root.set_attr("tabindex", tab_index.to_string());
            Ok(())
        })
    }

    fn set_id(&mut self, id: &str) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            root.id = Some(id.to_string());
            Ok(())
        })?;
        self.root = id.to_string();
        Ok(())
    }

    fn set_position(&mut self, position: Position) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            apply_position(root, position);
            Ok(())
        })
    }

    fn focus(&mut self) -> Result<(), GridError> {
        self.write_doc().focus(&self.root)?;
        Ok(())
    }

    fn scroll_values(&mut self, x: u32, y: u32) -> Result<(), GridError> {
        self.with_root_mut(|root, _| {
            section_mut(root, VALUES_DIV_CLASS)?.scroll_offset = (x, y);
            section_mut(root, HEADER_DIV_CLASS)?.scroll_offset.0 = x;
            Ok(())
        })
    }
}

// -----------------------------------------------------------------------------
// Subtree navigation
// -----------------------------------------------------------------------------

fn descend<'a>(mut el: &'a Element, path: &[&str]) -> Option<&'a Element> {
    for tag in path {
        el = el.child_nodes().iter().find(|c| c.tag == *tag)?;
    }
    Some(el)
}

fn descend_mut<'a>(mut el: &'a mut Element, path: &[&str]) -> Option<&'a mut Element> {
    for tag in path {
        el = match &mut el.content {
            Content::Children(children) => children.iter_mut().find(|c| c.tag == *tag)?,
            _ => return None,
        };
    }
    Some(el)
}

fn section<'a>(root: &'a Element, class: &str) -> Result<&'a Element, GridError> {
    root.child_nodes()
        .iter()
        .find(|c| c.tag == "div" && c.has_class(class))
        .ok_or_else(|| GridError::decode(format!("grid has no '{class}' block")))
}

fn section_mut<'a>(root: &'a mut Element, class: &str) -> Result<&'a mut Element, GridError> {
    let found = match &mut root.content {
        Content::Children(children) => children
            .iter_mut()
            .find(|c| c.tag == "div" && c.has_class(class)),
        _ => None,
    };
    found.ok_or_else(|| GridError::decode(format!("grid has no '{class}' block")))
}

fn tbody(root: &Element) -> Result<&Element, GridError> {
    descend(section(root, VALUES_DIV_CLASS)?, &["table", "tbody"])
        .ok_or_else(|| GridError::decode("values block has no table body"))
}

fn tbody_mut(root: &mut Element) -> Result<&mut Element, GridError> {
    descend_mut(section_mut(root, VALUES_DIV_CLASS)?, &["table", "tbody"])
        .ok_or_else(|| GridError::decode("values block has no table body"))
}

fn header_row(root: &Element) -> Result<&Element, GridError> {
    descend(section(root, HEADER_DIV_CLASS)?, &["table", "thead", "tr"])
        .ok_or_else(|| GridError::decode("header block has no header row"))
}

fn header_row_mut(root: &mut Element) -> Result<&mut Element, GridError> {
    descend_mut(section_mut(root, HEADER_DIV_CLASS)?, &["table", "thead", "tr"])
        .ok_or_else(|| GridError::decode("header block has no header row"))
}

fn set_hidden(el: &mut Element, hidden: bool) {
    if hidden {
        el.set_style("display", "none");
    } else {
        el.remove_style("display");
    }
}

fn set_cell_text(inner: &mut Element, text: &str) {
    if text.is_empty() {
        inner.content = Content::Children(vec![blank_image()]);
    } else {
        inner.set_text(text);
    }
}

/// Read rows back from rendered markup. Payloads come from the row's data
/// attribute, which the parser has already unescaped.
fn recover_rows(tbody: &Element) -> Result<RowStore, GridError> {
    tbody
        .child_nodes()
        .iter()
        .map(|tr| -> Result<RowData, GridError> {
            let cells = tr.child_nodes().iter().map(Element::text_content);
            let payload = match tr.get_attr(DATA_ATTR) {
                Some(json) if !json.is_empty() => Some(serde_json::from_str(json)?),
                _ => None,
            };
            Ok(RowData::new(cells, payload))
        })
        .collect()
}
