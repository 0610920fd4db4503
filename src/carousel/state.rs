//! Carousel state.

use crate::mvi::ViewState;

/// Carousel state machine.
///
/// `Inactive` until mounted over a complete structure; after that exactly one
/// slide (`current`) is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CarouselState {
    #[default]
    Inactive,
    Active {
        current: usize,
        slide_count: usize,
        autoplay: bool,
    },
}

impl ViewState for CarouselState {}

impl CarouselState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self {
            Self::Active { current, .. } => Some(*current),
            Self::Inactive => None,
        }
    }

    pub fn slide_count(&self) -> usize {
        match self {
            Self::Active { slide_count, .. } => *slide_count,
            Self::Inactive => 0,
        }
    }

    pub fn autoplay_active(&self) -> bool {
        matches!(self, Self::Active { autoplay: true, .. })
    }
}

/// Clamp a requested index into `0..slide_count` with wraparound.
///
/// Below zero selects the last slide and past the end selects the first; the
/// distance past either end does not matter.
pub fn normalize_index(index: isize, slide_count: usize) -> usize {
    if slide_count == 0 {
        return 0;
    }
    if index < 0 {
        slide_count - 1
    } else if index as usize >= slide_count {
        0
    } else {
        index as usize
    }
}
