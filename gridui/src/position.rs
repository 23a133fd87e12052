//! Absolute positioning of a control's root element.

use griddom::Element;

/// Where a control sits inside its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    /// Laid out by normal document flow.
    #[default]
    NotPositioned,
    /// Absolutely positioned at pixel offsets from the container.
    Absolute { left: i32, top: i32 },
}

impl Position {
    pub fn absolute(left: i32, top: i32) -> Self {
        Self::Absolute { left, top }
    }
}

/// Build an inline style string for a control root.
pub fn create_style(position: Position, width: Option<u32>, height: Option<u32>) -> String {
    let mut decls = Vec::new();
    if let Position::Absolute { left, top } = position {
        decls.push("position: absolute".to_string());
        decls.push(format!("left: {left}px"));
        decls.push(format!("top: {top}px"));
    }
    if let Some(width) = width {
        decls.push(format!("width: {width}px"));
    }
    if let Some(height) = height {
        decls.push(format!("height: {height}px"));
    }
    decls.join("; ")
}

/// Apply a position to an element's inline style.
pub fn apply_position(element: &mut Element, position: Position) {
    match position {
        Position::NotPositioned => {
            element.remove_style("position");
            element.remove_style("left");
            element.remove_style("top");
        }
        Position::Absolute { left, top } => {
            element.set_style("position", "absolute");
            element.set_style("left", format!("{left}px"));
            element.set_style("top", format!("{top}px"));
        }
    }
}

/// Read the position back from an element's inline style.
pub fn read_position(element: &Element) -> Position {
    if element.style_value("position") != Some("absolute") {
        return Position::NotPositioned;
    }
    let px = |name: &str| {
        element
            .style_value(name)
            .and_then(|v| v.trim().trim_end_matches("px").trim().parse::<i32>().ok())
            .unwrap_or(0)
    };
    Position::Absolute {
        left: px("left"),
        top: px("top"),
    }
}
