//! Visibility observation for the fallback loading path.

use std::collections::BTreeMap;

use crate::config::LazyLoadConfig;
use crate::dom::{Document, NodeId, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Margin added above and below the viewport.
    pub root_margin_vertical: f64,
    /// Margin added left and right of the viewport.
    pub root_margin_horizontal: f64,
    /// Minimum visible fraction of the target.
    pub threshold: f64,
}

impl From<&LazyLoadConfig> for ObserverOptions {
    fn from(config: &LazyLoadConfig) -> Self {
        Self {
            root_margin_vertical: config.root_margin_px,
            root_margin_horizontal: config.root_margin_horizontal_px,
            threshold: config.threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Tracks observed elements and reports when their visibility changes.
///
/// The first check after `observe` always reports the target; later checks
/// only report targets whose intersecting state flipped.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    options: ObserverOptions,
    /// Last reported intersecting state, `None` until first reported.
    observed: BTreeMap<NodeId, Option<bool>>,
}

impl VisibilityObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: BTreeMap::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Start observing. Observing an already observed node changes nothing.
    pub fn observe(&mut self, node: NodeId) {
        self.observed.entry(node).or_insert(None);
    }

    /// Stop observing; no further entries are produced for `node`.
    pub fn unobserve(&mut self, node: NodeId) -> bool {
        self.observed.remove(&node).is_some()
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.contains_key(&node)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Compute entries for every target whose state changed since it was last
    /// reported.
    pub fn take_records(&mut self, doc: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let root = viewport.rect().expand(
            self.options.root_margin_vertical,
            self.options.root_margin_horizontal,
        );
        let threshold = self.options.threshold;
        let mut entries = Vec::new();
        for (target, last) in self.observed.iter_mut() {
            let rect = doc.rect(*target);
            let ratio = rect.intersection_ratio(&root);
            let is_intersecting = rect.intersection(&root).is_some() && ratio >= threshold;
            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: *target,
                    is_intersecting,
                    ratio,
                });
            }
        }
        entries
    }
}
