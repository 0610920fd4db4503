//! Layout geometry used for visibility checks.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in document coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the box by `vertical` px above and below and `horizontal` px on
    /// each side.
    pub fn expand(&self, vertical: f64, horizontal: f64) -> Rect {
        Rect {
            x: self.x - horizontal,
            y: self.y - vertical,
            width: self.width + horizontal * 2.0,
            height: self.height + vertical * 2.0,
        }
    }

    /// Overlapping region, or `None` when the boxes do not touch.
    ///
    /// Edge-adjacent boxes produce a zero-area intersection.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Fraction of `self` that lies inside `root`, in `0.0..=1.0`.
    ///
    /// A zero-area target counts as fully visible when it touches the root.
    pub fn intersection_ratio(&self, root: &Rect) -> f64 {
        let Some(overlap) = self.intersection(root) else {
            return 0.0;
        };
        let area = self.area();
        if area == 0.0 {
            return 1.0;
        }
        (overlap.area() / area).clamp(0.0, 1.0)
    }
}

/// Scrollable visible area of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Visible area in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 250.0, 100.0, 100.0);
        assert!(a.intersection(&b).is_none());
        assert_eq!(b.intersection_ratio(&a), 0.0);
    }

    #[test]
    fn partial_overlap_ratio() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let target = Rect::new(0.0, 50.0, 100.0, 100.0);
        assert!((target.intersection_ratio(&root) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn expand_adds_margin_on_both_sides() {
        let rect = Rect::new(0.0, 800.0, 1280.0, 800.0).expand(100.0, 0.0);
        assert_eq!(rect.y, 700.0);
        assert_eq!(rect.height, 1000.0);
        assert_eq!(rect.width, 1280.0);
    }

    #[test]
    fn margin_brings_target_into_range() {
        let viewport = Viewport::new(1280.0, 800.0);
        let target = Rect::new(0.0, 850.0, 200.0, 200.0);
        assert_eq!(target.intersection_ratio(&viewport.rect()), 0.0);
        let ratio = target.intersection_ratio(&viewport.rect().expand(100.0, 0.0));
        assert!(ratio > 0.2);
    }

    #[test]
    fn zero_area_target_touching_root_is_visible() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let target = Rect::new(10.0, 100.0, 0.0, 0.0);
        assert_eq!(target.intersection_ratio(&root), 1.0);
    }
}
