//! Executes a [`Scenario`] against a [`Page`].

use serde::Serialize;

use crate::config::Config;
use crate::dom::{Document, NodeId};
use crate::host::{Network, Page};
use crate::lazy::ImageStatus;

use super::markup::{append_image, build_carousel, CarouselMarkup};
use super::{parse_key, Scenario, Step};

/// Page state after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time_ms: u64,
    pub step: String,
    pub current_slide: Option<usize>,
    pub autoplay: bool,
    pub images: Vec<ImageSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSnapshot {
    pub label: String,
    pub src: Option<String>,
    pub status: Option<ImageStatus>,
}

/// Node ids the runner needs to drive the page and label snapshots.
struct Handles {
    carousel: Option<CarouselMarkup>,
    images: Vec<NodeId>,
}

impl Scenario {
    /// Build the page described by the scenario, not yet initialized.
    pub fn build_page(&self, config: Config) -> Page {
        self.build(config).0
    }

    fn build(&self, config: Config) -> (Page, Handles) {
        let mut doc = Document::new();
        let body = doc.body();

        let carousel = self.carousel.as_ref().map(|spec| {
            build_carousel(
                &mut doc,
                body,
                &config.carousel.container_id,
                &spec.slides,
                spec.deferred,
            )
        });
        let images = self
            .images
            .iter()
            .map(|spec| {
                append_image(
                    &mut doc,
                    body,
                    &spec.src,
                    spec.top,
                    spec.height,
                    spec.deferred,
                    spec.native_lazy,
                )
            })
            .collect();

        let network = Network::new(self.network.latency_ms)
            .with_resources(self.network.available.iter().cloned());
        let page = Page::new(doc)
            .with_config(config)
            .with_viewport(self.viewport)
            .with_capabilities(self.capabilities)
            .with_network(network);
        (page, Handles { carousel, images })
    }

    /// Initialize the page, run every step and return a snapshot after
    /// initialization and after each step.
    pub fn run(&self, config: Config) -> Vec<Snapshot> {
        let (mut page, handles) = self.build(config);
        page.ready();

        let mut snapshots = vec![snapshot(&page, &handles, "ready".to_string())];
        for step in &self.steps {
            apply(&mut page, &handles, step);
            snapshots.push(snapshot(&page, &handles, step.describe()));
        }
        snapshots
    }
}

fn apply(page: &mut Page, handles: &Handles, step: &Step) {
    match step {
        Step::Advance { ms } => page.advance(*ms),
        Step::Settle => page.settle(),
        Step::Scroll { y } => page.scroll_to(*y),
        _ => {
            // validate() guarantees a carousel for the remaining steps.
            let Some(markup) = handles.carousel.as_ref() else {
                return;
            };
            match step {
                Step::Next => {
                    page.click(markup.next);
                }
                Step::Previous => {
                    page.click(markup.previous);
                }
                Step::Dot { index } => {
                    if let Some(dot) = markup.dots.get(*index) {
                        page.click(*dot);
                    }
                }
                Step::Key { index, key } => {
                    if let Some(dot) = markup.dots.get(*index) {
                        page.key_down(*dot, parse_key(key));
                    }
                }
                Step::Hover => {
                    page.pointer_enter(markup.slider);
                }
                Step::Leave => {
                    page.pointer_leave(markup.slider);
                }
                Step::Advance { .. } | Step::Settle | Step::Scroll { .. } => {}
            }
        }
    }
}

fn snapshot(page: &Page, handles: &Handles, step: String) -> Snapshot {
    let doc = page.document();
    let describe = |label: String, node: NodeId| ImageSnapshot {
        label,
        src: doc.src(node).map(str::to_string),
        status: page.images().and_then(|images| images.status(node)),
    };

    let slide_images = handles
        .carousel
        .iter()
        .flat_map(|markup| markup.images.iter().enumerate())
        .map(|(index, node)| describe(format!("slide-{}", index), *node));
    let other_images = handles
        .images
        .iter()
        .enumerate()
        .map(|(index, node)| describe(format!("image-{}", index), *node));

    Snapshot {
        time_ms: page.now(),
        step,
        current_slide: page.carousel().map(|c| c.current_index()),
        autoplay: page
            .carousel()
            .is_some_and(|c| c.state().autoplay_active()),
        images: slide_images.chain(other_images).collect(),
    }
}
