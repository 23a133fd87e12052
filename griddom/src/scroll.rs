/// Compute the scroll offset that brings an item fully into a viewport.
///
/// `item_top` is measured from the top of the scrolled content. An item
/// above the visible window is aligned to the top edge, an item below it to
/// the bottom edge, and an item already visible leaves the offset unchanged.
pub fn reveal_offset(scroll_top: u32, item_top: u32, item_height: u32, viewport_height: u32) -> u32 {
    let visible_top = i64::from(item_top) - i64::from(scroll_top);

    if visible_top < 0 {
        item_top
    } else if visible_top + i64::from(item_height) > i64::from(viewport_height) {
        (i64::from(scroll_top) + visible_top + i64::from(item_height) - i64::from(viewport_height))
            .max(0) as u32
    } else {
        scroll_top
    }
}
