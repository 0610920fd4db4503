use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub lazy_load: LazyLoadConfig,
}

/// Carousel behavior and inline layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Id of the element wrapping the slider, dots and buttons.
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Autoplay period in milliseconds (default: 4000).
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    /// Slide opacity transition in milliseconds (default: 500).
    #[serde(default = "default_fade_duration_ms")]
    pub fade_duration_ms: u64,
    /// CSS height of the slider root (default: "400px").
    #[serde(default = "default_height")]
    pub height: String,
}

/// Deferred image activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LazyLoadConfig {
    /// Distance above and below the viewport at which loading starts (default: 100).
    #[serde(default = "default_root_margin_px")]
    pub root_margin_px: f64,
    /// Distance left and right of the viewport (default: 0).
    #[serde(default)]
    pub root_margin_horizontal_px: f64,
    /// Visible fraction that counts as intersecting (default: 0.01).
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Image substituted when a carousel image fails to load.
    #[serde(default = "default_fallback_src")]
    pub fallback_src: String,
}

fn default_container_id() -> String {
    "media-container".to_string()
}

fn default_autoplay_interval_ms() -> u64 {
    4000
}

fn default_fade_duration_ms() -> u64 {
    500
}

fn default_height() -> String {
    "400px".to_string()
}

fn default_root_margin_px() -> f64 {
    100.0
}

fn default_threshold() -> f64 {
    0.01
}

fn default_fallback_src() -> String {
    "images/fallback.jpg".to_string()
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            autoplay_interval_ms: default_autoplay_interval_ms(),
            fade_duration_ms: default_fade_duration_ms(),
            height: default_height(),
        }
    }
}

impl Default for LazyLoadConfig {
    fn default() -> Self {
        Self {
            root_margin_px: default_root_margin_px(),
            root_margin_horizontal_px: 0.0,
            threshold: default_threshold(),
            fallback_src: default_fallback_src(),
        }
    }
}
