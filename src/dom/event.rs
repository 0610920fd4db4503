//! Events the host delivers to page components.

/// Keyboard key carried by a key-down event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" => Key::Escape,
            "Tab" => Key::Tab,
            other => Key::Other(other.to_string()),
        }
    }

    /// Keys that activate a focused control.
    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    KeyDown(Key),
    PointerEnter,
    PointerLeave,
    /// Resource behind an `img` finished loading.
    Load,
    /// Resource behind an `img` failed to load.
    Error,
}
