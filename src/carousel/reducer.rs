//! Reducer for carousel navigation and autoplay state.

use crate::mvi::Reducer;

use super::intent::CarouselIntent;
use super::state::{normalize_index, CarouselState};

/// Pure transition function. Rendering and timer bookkeeping are done by the
/// controller around each dispatch.
pub struct CarouselReducer;

impl Reducer for CarouselReducer {
    type State = CarouselState;
    type Intent = CarouselIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CarouselIntent::Mount { slide_count: 0 } => CarouselState::Inactive,
            CarouselIntent::Mount { slide_count } => CarouselState::Active {
                current: 0,
                slide_count,
                autoplay: false,
            },
            CarouselIntent::GoTo { index } => match state {
                CarouselState::Active {
                    slide_count,
                    autoplay,
                    ..
                } => CarouselState::Active {
                    current: normalize_index(index, slide_count),
                    slide_count,
                    autoplay,
                },
                other => other,
            },
            CarouselIntent::Next => step(state, 1),
            CarouselIntent::Previous => step(state, -1),
            CarouselIntent::Tick => match state {
                CarouselState::Active { autoplay: true, .. } => step(state, 1),
                other => other,
            },
            CarouselIntent::AutoplayStarted => set_autoplay(state, true),
            CarouselIntent::AutoplayStopped => set_autoplay(state, false),
        }
    }
}

fn step(state: CarouselState, delta: isize) -> CarouselState {
    match state {
        CarouselState::Active { current, .. } => CarouselReducer::reduce(
            state,
            CarouselIntent::GoTo {
                index: current as isize + delta,
            },
        ),
        other => other,
    }
}

fn set_autoplay(state: CarouselState, on: bool) -> CarouselState {
    match state {
        CarouselState::Active {
            current,
            slide_count,
            ..
        } => CarouselState::Active {
            current,
            slide_count,
            autoplay: on,
        },
        other => other,
    }
}
