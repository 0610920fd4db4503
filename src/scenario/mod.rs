//! Scripted page sessions.
//!
//! A scenario describes a page (viewport, capabilities, available resources,
//! carousel slides, other images) and a list of user/time steps. Running it
//! produces one [`Snapshot`] per step.

mod markup;
mod runner;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::dom::{Key, Viewport};
use crate::host::Capabilities;

pub use markup::{append_image, build_carousel, CarouselMarkup, CAROUSEL_HEIGHT, CAROUSEL_TOP};
pub use runner::{ImageSnapshot, Snapshot};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario '{origin}': {source}")]
    ParseError {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid scenario: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub network: NetworkSpec,
    #[serde(default)]
    pub carousel: Option<CarouselSpec>,
    #[serde(default)]
    pub images: Vec<ImageSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkSpec {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// URLs that resolve; everything else fails.
    #[serde(default)]
    pub available: Vec<String>,
}

fn default_latency_ms() -> u64 {
    50
}

impl Default for NetworkSpec {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            available: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarouselSpec {
    pub slides: Vec<String>,
    /// Put slide sources in `data-src` instead of `src` (default: true).
    #[serde(default = "default_true")]
    pub deferred: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageSpec {
    pub src: String,
    pub top: f64,
    #[serde(default = "default_image_height")]
    pub height: f64,
    #[serde(default = "default_true")]
    pub deferred: bool,
    #[serde(default)]
    pub native_lazy: bool,
}

fn default_true() -> bool {
    true
}

fn default_image_height() -> f64 {
    300.0
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Let virtual time pass.
    Advance { ms: u64 },
    /// Wait until no image request is in flight.
    Settle,
    Scroll { y: f64 },
    Next,
    Previous,
    /// Click indicator `index`.
    Dot { index: usize },
    /// Key press on indicator `index` (`"enter"`, `"space"`, ...).
    Key { index: usize, key: String },
    /// Pointer enters the slider.
    Hover,
    /// Pointer leaves the slider.
    Leave,
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::Advance { ms } => format!("advance {}ms", ms),
            Step::Settle => "settle".to_string(),
            Step::Scroll { y } => format!("scroll to {}", y),
            Step::Next => "next".to_string(),
            Step::Previous => "previous".to_string(),
            Step::Dot { index } => format!("dot {}", index),
            Step::Key { index, key } => format!("key {:?} on dot {}", key, index),
            Step::Hover => "hover".to_string(),
            Step::Leave => "leave".to_string(),
        }
    }

    fn needs_carousel(&self) -> bool {
        !matches!(self, Step::Advance { .. } | Step::Settle | Step::Scroll { .. })
    }
}

/// Parse a scenario key name.
pub fn parse_key(name: &str) -> Key {
    match name.to_ascii_lowercase().as_str() {
        "enter" => Key::Enter,
        "space" | " " => Key::Space,
        "escape" | "esc" => Key::Escape,
        "tab" => Key::Tab,
        _ => Key::from_key_value(name),
    }
}

impl Scenario {
    pub fn load_from(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|e| ScenarioError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse and validate TOML. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario =
            toml::from_str(content).map_err(|e| ScenarioError::ParseError {
                origin: origin.to_string(),
                source: e,
            })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks:
    /// - Carousel steps only appear when a carousel is declared
    /// - Indicator indexes exist
    /// - Viewport has a positive size
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ScenarioError::Invalid {
                message: "viewport width and height must be positive".to_string(),
            });
        }
        let slide_count = self.carousel.as_ref().map_or(0, |c| c.slides.len());
        for (position, step) in self.steps.iter().enumerate() {
            if step.needs_carousel() && slide_count == 0 {
                return Err(ScenarioError::Invalid {
                    message: format!(
                        "step {} ({}) needs a carousel with slides",
                        position + 1,
                        step.describe()
                    ),
                });
            }
            if let Step::Dot { index } | Step::Key { index, .. } = step {
                if *index >= slide_count {
                    return Err(ScenarioError::Invalid {
                        message: format!(
                            "step {} targets indicator {} but there are {} slides",
                            position + 1,
                            index,
                            slide_count
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
