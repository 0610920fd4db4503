//! Base trait for component state.

/// Marker trait for view state objects.
///
/// States should be:
/// - Cheap to clone
/// - Self-contained (all data needed to render the view)
/// - Comparable, so renders can be skipped when nothing changed
pub trait ViewState: Clone + PartialEq + Default + 'static {}
