//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (control clicks, key presses, hover)
/// - Host events (timer ticks)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: 'static {}
