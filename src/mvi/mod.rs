//! Model-View-Intent primitives shared by page components.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View (document mutations)
//!    ↑                                  │
//!    └──────── DOM events / timers ─────┘
//! ```
//!
//! - **State**: plain value describing what the component shows
//! - **Intent**: user action or host event
//! - **Reducer**: pure function producing the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ViewState;
