use media_carousel::carousel::{normalize_index, CarouselIntent, CarouselReducer, CarouselState};
use media_carousel::mvi::Reducer;

fn active(current: usize, autoplay: bool) -> CarouselState {
    CarouselState::Active {
        current,
        slide_count: 3,
        autoplay,
    }
}

#[test]
fn mount_with_slides_activates_on_first() {
    let state = CarouselReducer::reduce(
        CarouselState::Inactive,
        CarouselIntent::Mount { slide_count: 3 },
    );
    assert_eq!(state, active(0, false));
}

#[test]
fn mount_without_slides_stays_inactive() {
    let state = CarouselReducer::reduce(
        CarouselState::Inactive,
        CarouselIntent::Mount { slide_count: 0 },
    );
    assert_eq!(state, CarouselState::Inactive);
}

#[test]
fn navigation_on_inactive_is_noop() {
    for intent in [
        CarouselIntent::Next,
        CarouselIntent::Previous,
        CarouselIntent::GoTo { index: 2 },
        CarouselIntent::Tick,
        CarouselIntent::AutoplayStarted,
    ] {
        let state = CarouselReducer::reduce(CarouselState::Inactive, intent);
        assert_eq!(state, CarouselState::Inactive);
    }
}

#[test]
fn next_wraps_from_last_to_first() {
    let state = CarouselReducer::reduce(active(2, false), CarouselIntent::Next);
    assert_eq!(state.current_index(), Some(0));
}

#[test]
fn previous_wraps_from_first_to_last() {
    let state = CarouselReducer::reduce(active(0, false), CarouselIntent::Previous);
    assert_eq!(state.current_index(), Some(2));
}

#[test]
fn go_to_out_of_range_snaps_to_ends() {
    let state = CarouselReducer::reduce(active(1, false), CarouselIntent::GoTo { index: -7 });
    assert_eq!(state.current_index(), Some(2));
    let state = CarouselReducer::reduce(active(1, false), CarouselIntent::GoTo { index: 42 });
    assert_eq!(state.current_index(), Some(0));
}

#[test]
fn go_to_current_is_idempotent() {
    let state = CarouselReducer::reduce(active(1, true), CarouselIntent::GoTo { index: 1 });
    assert_eq!(state, active(1, true));
}

#[test]
fn tick_advances_only_while_autoplay_runs() {
    let state = CarouselReducer::reduce(active(0, true), CarouselIntent::Tick);
    assert_eq!(state, active(1, true));

    let state = CarouselReducer::reduce(active(0, false), CarouselIntent::Tick);
    assert_eq!(state, active(0, false));
}

#[test]
fn autoplay_flag_follows_start_and_stop() {
    let state = CarouselReducer::reduce(active(1, false), CarouselIntent::AutoplayStarted);
    assert!(state.autoplay_active());
    let state = CarouselReducer::reduce(state, CarouselIntent::AutoplayStopped);
    assert!(!state.autoplay_active());
    assert_eq!(state.current_index(), Some(1));
}

#[test]
fn navigation_preserves_autoplay_flag() {
    let state = CarouselReducer::reduce(active(0, true), CarouselIntent::Next);
    assert!(state.autoplay_active());
}

#[test]
fn normalize_index_handles_single_slide() {
    assert_eq!(normalize_index(-1, 1), 0);
    assert_eq!(normalize_index(1, 1), 0);
    assert_eq!(normalize_index(0, 1), 0);
}
