//! Locating the elements a carousel is built from.

use thiserror::Error;

use crate::dom::{Document, NodeId};

pub const SLIDER_CLASS: &str = "slider";
pub const SLIDE_CLASS: &str = "slide";
pub const DOTS_CLASS: &str = "dots";
pub const DOT_CLASS: &str = "dot";
pub const PREV_CLASS: &str = "prev-btn";
pub const NEXT_CLASS: &str = "next-btn";

/// Why a container cannot host a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("no `.slider` root")]
    NoSlider,
    #[error("no `.slide` elements")]
    NoSlides,
    #[error("no `.dots` container")]
    NoDots,
    #[error("no `.prev-btn` control")]
    NoPrevious,
    #[error("no `.next-btn` control")]
    NoNext,
    #[error("{dots} indicators for {slides} slides")]
    IndicatorMismatch { slides: usize, dots: usize },
}

/// Element references owned by one carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselParts {
    /// Hover target and clipping box.
    pub slider: NodeId,
    pub slides: Vec<NodeId>,
    /// One indicator per slide, same order.
    pub dots: Vec<NodeId>,
    pub previous: NodeId,
    pub next: NodeId,
}

impl CarouselParts {
    /// Find the carousel structure inside `container`.
    ///
    /// The container may itself be the slider root.
    pub fn discover(doc: &Document, container: NodeId) -> Result<Self, StructureError> {
        let slider = if doc.has_class(container, SLIDER_CLASS) {
            container
        } else {
            doc.query_first_class(container, SLIDER_CLASS)
                .ok_or(StructureError::NoSlider)?
        };
        let slides = doc.query_class(slider, SLIDE_CLASS);
        let dots_root = doc
            .query_first_class(container, DOTS_CLASS)
            .ok_or(StructureError::NoDots)?;
        let dots = doc.query_class(dots_root, DOT_CLASS);
        let previous = doc
            .query_first_class(container, PREV_CLASS)
            .ok_or(StructureError::NoPrevious)?;
        let next = doc
            .query_first_class(container, NEXT_CLASS)
            .ok_or(StructureError::NoNext)?;

        let parts = Self {
            slider,
            slides,
            dots,
            previous,
            next,
        };
        parts.validate()?;
        Ok(parts)
    }

    /// Check the invariants discovery guarantees, for hand-built parts.
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.slides.is_empty() {
            return Err(StructureError::NoSlides);
        }
        if self.dots.len() != self.slides.len() {
            return Err(StructureError::IndicatorMismatch {
                slides: self.slides.len(),
                dots: self.dots.len(),
            });
        }
        Ok(())
    }

    /// Index of the indicator containing `target`.
    pub fn indicator_index(&self, doc: &Document, target: NodeId) -> Option<usize> {
        self.dots
            .iter()
            .position(|dot| doc.is_inclusive_descendant(target, *dot))
    }

    /// The image shown by a slide, if any.
    pub fn slide_image(&self, doc: &Document, slide: NodeId) -> Option<NodeId> {
        doc.query_tag(slide, "img").into_iter().next()
    }
}
