//! A slide carousel with autoplay and hover pause, plus deferred image
//! loading, running against a simulated page.

pub mod carousel;
pub mod config;
pub mod dom;
pub mod host;
pub mod lazy;
pub mod logging;
pub mod mvi;
pub mod scenario;

pub use host::Page;
