//! JSON grid definitions.
//!
//! ```json
//! {
//!   "id": "people",
//!   "columns": [{ "title": "Name", "width": 120 }, { "title": "Age", "class": "num" }],
//!   "rows": [{ "cells": ["Ada", "36"], "data": { "key": 1 } }],
//!   "selected": 0,
//!   "dragDrop": true
//! }
//! ```

use gridui::{Column, Grid, GridConfig, GridError, Position};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_column_width")]
    pub width: u32,
    #[serde(default)]
    pub class: String,
}

fn default_column_width() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowDef {
    pub cells: Vec<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDefinition {
    pub id: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub rows: Vec<RowDef>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub tab_index: i32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default = "enabled_by_default")]
    pub headers_visible: bool,
    #[serde(default)]
    pub drag_drop: bool,
    pub selected: Option<usize>,
    /// `[left, top]` for an absolutely positioned grid.
    pub position: Option<(i32, i32)>,
}

fn enabled_by_default() -> bool {
    true
}

impl GridDefinition {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn config(&self) -> GridConfig {
        let defaults = GridConfig::default();
        GridConfig::new()
            .columns(
                self.columns
                    .iter()
                    .map(|c| Column::new(c.title.clone(), c.width).class(c.class.clone())),
            )
            .size(
                self.width.unwrap_or(defaults.width),
                self.height.unwrap_or(defaults.height),
            )
            .tab_index(self.tab_index)
            .enabled(self.enabled)
            .headers_visible(self.headers_visible)
            .drag_drop(self.drag_drop)
    }

    /// Build the headless grid this definition describes.
    pub fn build(&self) -> Result<Grid, GridError> {
        let grid = Grid::from_config(self.config())?;
        grid.set_id(self.id.clone())?;
        if let Some((left, top)) = self.position {
            grid.set_position(Position::absolute(left, top))?;
        }
        grid.rebuild(|g| {
            self.rows
                .iter()
                .try_for_each(|row| g.add_item(row.cells.iter().cloned(), row.data.clone()))
        })??;
        grid.set_selected_index(self.selected)?;
        Ok(grid)
    }
}
