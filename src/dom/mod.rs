//! Simulated document tree: elements, events and layout geometry.

mod document;
mod event;
mod geometry;

pub use document::{Document, Element, NodeId, SrcChange};
pub use event::{DomEvent, Key};
pub use geometry::{Rect, Viewport};
