use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselIntent {
    /// Structure found; activates the state with slide 0 selected.
    Mount { slide_count: usize },
    /// Jump to a slide. Out-of-range values wrap.
    GoTo { index: isize },
    Next,
    Previous,
    /// Autoplay interval was (re)started.
    AutoplayStarted,
    /// Autoplay interval was cancelled (hover or teardown).
    AutoplayStopped,
    /// Autoplay interval fired. Ignored while autoplay is off.
    Tick,
}

impl Intent for CarouselIntent {}
