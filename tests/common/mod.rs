//! Shared page fixtures and log capture.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use media_carousel::carousel::is_slide_visible;
use media_carousel::config::Config;
use media_carousel::dom::{Document, NodeId, Viewport};
use media_carousel::host::{Capabilities, Network};
use media_carousel::scenario::{append_image, build_carousel, CarouselMarkup};
use media_carousel::Page;
use parking_lot::Mutex;
use tempfile::TempDir;

pub type SpyBuffer = Arc<Mutex<Vec<u8>>>;

pub const SLIDES: [&str; 3] = ["images/one.jpg", "images/two.jpg", "images/three.jpg"];
pub const FALLBACK: &str = "images/fallback.jpg";

pub fn slide_sources() -> Vec<String> {
    SLIDES.iter().map(|s| s.to_string()).collect()
}

/// Page with a deferred three-slide carousel whose images all resolve.
pub fn three_slide_page(capabilities: Capabilities) -> (Page, CarouselMarkup) {
    let mut doc = Document::new();
    let body = doc.body();
    let markup = build_carousel(&mut doc, body, "media-container", &slide_sources(), true);
    let network = Network::new(50).with_resources(SLIDES.iter().copied().chain([FALLBACK]));
    let page = Page::new(doc)
        .with_capabilities(capabilities)
        .with_network(network);
    (page, markup)
}

/// Same as [`three_slide_page`] but already initialized.
pub fn ready_carousel() -> (Page, CarouselMarkup) {
    let (mut page, markup) = three_slide_page(Capabilities::observer_only());
    page.ready();
    (page, markup)
}

/// Page with one deferred image at each `top`, no carousel.
pub fn gallery_page(
    capabilities: Capabilities,
    tops: &[f64],
    available: &[&str],
) -> (Page, Vec<NodeId>) {
    let mut doc = Document::new();
    let body = doc.body();
    let images = tops
        .iter()
        .enumerate()
        .map(|(index, top)| {
            append_image(
                &mut doc,
                body,
                &format!("images/gallery-{}.jpg", index),
                *top,
                300.0,
                true,
                false,
            )
        })
        .collect();
    let network = Network::new(50).with_resources(available.iter().copied());
    let page = Page::new(doc)
        .with_viewport(Viewport::new(1280.0, 800.0))
        .with_capabilities(capabilities)
        .with_network(network);
    (page, images)
}

/// Indexes of the slides currently rendered visible.
pub fn visible_slides(page: &Page, markup: &CarouselMarkup) -> Vec<usize> {
    let Some(carousel) = page.carousel() else {
        return Vec::new();
    };
    (0..markup.slides.len())
        .filter(|index| is_slide_visible(page.document(), carousel.parts(), *index))
        .collect()
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Log capture --------------------------------------------------------------

/// Writer that records everything the fmt subscriber emits.
#[derive(Clone)]
pub struct SpyWriter(SpyBuffer);

impl std::io::Write for SpyWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return what it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer: SpyBuffer = Arc::new(Mutex::new(Vec::new()));
    let writer = SpyWriter(buffer.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.lock()).into_owned();
    (result, logs)
}

/// Default config with a custom autoplay interval.
pub fn config_with_interval(ms: u64) -> Config {
    let mut config = Config::default();
    config.carousel.autoplay_interval_ms = ms;
    config
}
