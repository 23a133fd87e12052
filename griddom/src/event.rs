/// Input events delivered to a widget, in widget-local pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Key press event, targeted at the focused widget
    Key { key: Key },
    /// Mouse click event
    Click { x: i32, y: i32, button: MouseButton },
    /// Mouse button pressed on a draggable element
    DragStart { x: i32, y: i32 },
    /// Mouse drag event (button held while moving)
    Drag { x: i32, y: i32 },
    /// Mouse button release event ending a drag
    Release { x: i32, y: i32 },
    /// Scroll offset of a scrollable region changed
    Scroll { x: u32, y: u32 },
    /// A resize handle on the column header `column` was released
    ResizeStop { column: usize, width: f64 },
}

/// Keys the grid reacts to, plus any letter or digit by its upper-case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
}

impl Key {
    /// Browser `keyCode` for this key.
    pub fn key_code(&self) -> u32 {
        match self {
            Key::Char(c) => c.to_ascii_uppercase() as u32,
            Key::Up => 38,
            Key::Down => 40,
        }
    }

    /// Map a browser `keyCode` back to a key, when it has a dedicated variant.
    pub fn from_key_code(code: u32) -> Option<Key> {
        let key = match code {
            38 => Key::Up,
            40 => Key::Down,
            48..=57 | 65..=90 => Key::Char(char::from_u32(code)?),
            _ => return None,
        };
        Some(key)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}
