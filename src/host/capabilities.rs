use serde::{Deserialize, Serialize};

/// Browser features the page can rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// `loading="lazy"` on images is honored.
    #[serde(default)]
    pub native_lazy_loading: bool,
    /// Visibility observation is available.
    #[serde(default = "default_true")]
    pub intersection_observer: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            native_lazy_loading: false,
            intersection_observer: true,
        }
    }
}

impl Capabilities {
    pub fn native() -> Self {
        Self {
            native_lazy_loading: true,
            intersection_observer: true,
        }
    }

    pub fn observer_only() -> Self {
        Self::default()
    }

    pub fn none() -> Self {
        Self {
            native_lazy_loading: false,
            intersection_observer: false,
        }
    }
}
