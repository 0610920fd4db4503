//! Image carousel: wraparound navigation, indicators and hover-paused
//! autoplay.

mod controller;
mod intent;
mod parts;
mod reducer;
mod state;
mod view;

pub use controller::CarouselController;
pub use intent::CarouselIntent;
pub use parts::{
    CarouselParts, StructureError, DOTS_CLASS, DOT_CLASS, NEXT_CLASS, PREV_CLASS, SLIDER_CLASS,
    SLIDE_CLASS,
};
pub use reducer::CarouselReducer;
pub use state::{normalize_index, CarouselState};
pub use view::{is_slide_visible, ACTIVE_CLASS};
