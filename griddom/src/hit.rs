use crate::element::Element;
use crate::layout::{outer_height, Metrics};

/// Find the child of `parent` whose vertical extent contains `y`.
///
/// `y` is measured from the top of the parent's content. Returns None when
/// the point lies above the first child or below the last one.
pub fn child_at_y(parent: &Element, y: i64, metrics: &Metrics) -> Option<usize> {
    if y < 0 {
        return None;
    }
    let mut top = 0i64;
    for (index, child) in parent.child_nodes().iter().enumerate() {
        let bottom = top + i64::from(outer_height(child, metrics));
        if y >= top && y < bottom {
            return Some(index);
        }
        top = bottom;
    }
    None
}

/// Find the index of the span containing `x`, given consecutive span widths.
pub fn span_at_x(widths: &[u32], x: i64) -> Option<usize> {
    if x < 0 {
        return None;
    }
    let mut left = 0i64;
    for (index, width) in widths.iter().enumerate() {
        let right = left + i64::from(*width);
        if x >= left && x < right {
            return Some(index);
        }
        left = right;
    }
    None
}
