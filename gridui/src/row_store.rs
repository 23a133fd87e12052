//! Positional row storage.
//!
//! Rows have no stable identity: they are addressed by position only, and
//! every insert, remove or move shifts the rows after the change point. Any
//! index held across such a change must be re-resolved by its holder.

use serde_json::Value;

use crate::error::GridError;

/// One row: display texts plus an opaque payload the grid never interprets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowData {
    /// Cell texts by column. May be shorter than the column count; missing
    /// cells render blank.
    pub cells: Vec<String>,
    /// Consumer payload carried alongside the row.
    pub payload: Option<Value>,
}

impl RowData {
    /// Create a row from cell texts and an optional payload.
    ///
    /// `\r\n` and lone `\r` in cell texts become `\n`, matching what an
    /// HTML parser reads back from rendered markup.
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>, payload: Option<Value>) -> Self {
        Self {
            cells: cells
                .into_iter()
                .map(|cell| normalize_newlines(cell.into()))
                .collect(),
            payload,
        }
    }

    /// Text of cell `col`, or an empty string past the end of `cells`.
    pub fn cell(&self, col: usize) -> &str {
        self.cells.get(col).map(String::as_str).unwrap_or("")
    }
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// Ordered sequence of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<RowData>,
}

impl RowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a row at `index`, shifting later rows down. `index == len()`
    /// appends.
    pub fn insert(&mut self, index: usize, row: RowData) -> Result<(), GridError> {
        if index > self.rows.len() {
            return Err(GridError::index(index, self.rows.len()));
        }
        self.rows.insert(index, row);
        Ok(())
    }

    /// Append a row.
    pub fn push(&mut self, row: RowData) {
        self.rows.push(row);
    }

    /// Replace the row at `index`, returning the previous one.
    pub fn update(&mut self, index: usize, row: RowData) -> Result<RowData, GridError> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or_else(|| GridError::index(index, len))?;
        Ok(std::mem::replace(slot, row))
    }

    /// Remove the row at `index`, shifting later rows up.
    pub fn remove(&mut self, index: usize) -> Result<RowData, GridError> {
        GridError::check_index(index, self.rows.len())?;
        Ok(self.rows.remove(index))
    }

    /// Get the row at `index`.
    pub fn get(&self, index: usize) -> Result<&RowData, GridError> {
        self.rows
            .get(index)
            .ok_or_else(|| GridError::index(index, self.rows.len()))
    }

    /// Move the row at `from` so that it ends up at position `to`.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<(), GridError> {
        GridError::check_index(from, self.rows.len())?;
        GridError::check_index(to, self.rows.len())?;
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        Ok(())
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &RowData> {
        self.rows.iter()
    }
}

impl FromIterator<RowData> for RowStore {
    fn from_iter<I: IntoIterator<Item = RowData>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
