//! Deferred image activation.
//!
//! Carousel images are loaded immediately. Every other image carrying
//! `data-src` is loaded by the environment's native deferral, by a visibility
//! observer, or eagerly when neither exists.

mod observer;
mod strategy;

pub use observer::{IntersectionEntry, ObserverOptions, VisibilityObserver};
pub use strategy::{ActivationMode, ImageActivation, ImageFetcher, ImageStatus, PreloadId};

/// Attribute holding a not-yet-assigned image URL.
pub const DEFERRED_SRC_ATTR: &str = "data-src";
/// Native lazy-loading hint attribute.
pub const NATIVE_LAZY_ATTR: &str = "loading";
pub const LOADED_CLASS: &str = "lazy-loaded";
pub const ERROR_CLASS: &str = "lazy-load-error";
