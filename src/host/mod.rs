//! Deterministic stand-in for the browser: virtual timers, a resource
//! server, capability flags and the [`Page`] that routes events to the
//! carousel and the image strategy.

mod capabilities;
mod network;
mod page;
mod timers;

pub use capabilities::Capabilities;
pub use network::{FetchOutcome, Network, Response};
pub use page::Page;
pub use timers::{Fired, Scheduler, TaggedScheduler, TimerHandle, TimerQueue};
