//! The page host: owns the document and plays the browser's role of event
//! loop, resource loader and viewport.

use std::collections::{BTreeMap, HashMap};

use crate::carousel::CarouselController;
use crate::config::Config;
use crate::dom::{Document, DomEvent, Key, NodeId, SrcChange, Viewport};
use crate::lazy::{
    ImageActivation, ImageFetcher, IntersectionEntry, PreloadId, NATIVE_LAZY_ATTR,
};

use super::capabilities::Capabilities;
use super::network::{FetchOutcome, Network};
use super::timers::{Fired, TaggedScheduler, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostTask {
    Autoplay,
    Fetch(u64),
}

#[derive(Debug, Clone, Copy)]
enum FetchTarget {
    Element(NodeId),
    Detached(PreloadId),
}

#[derive(Debug, Clone)]
struct PendingFetch {
    url: String,
    target: FetchTarget,
    outcome: FetchOutcome,
}

/// Timers, network and in-flight fetches.
struct Runtime {
    timers: TimerQueue<HostTask>,
    network: Network,
    fetches: HashMap<u64, PendingFetch>,
    next_fetch: u64,
    next_preload: u64,
}

impl Runtime {
    fn new(network: Network) -> Self {
        Self {
            timers: TimerQueue::new(),
            network,
            fetches: HashMap::new(),
            next_fetch: 0,
            next_preload: 0,
        }
    }

    fn fetch(&mut self, url: &str, target: FetchTarget) {
        let response = self.network.request(url);
        let id = self.next_fetch;
        self.next_fetch += 1;
        self.fetches.insert(
            id,
            PendingFetch {
                url: url.to_string(),
                target,
                outcome: response.outcome,
            },
        );
        self.timers
            .set_timeout(response.latency_ms, HostTask::Fetch(id));
    }
}

impl ImageFetcher for Runtime {
    fn preload(&mut self, url: &str) -> PreloadId {
        let id = PreloadId::new(self.next_preload);
        self.next_preload += 1;
        self.fetch(url, FetchTarget::Detached(id));
        id
    }
}

pub struct Page {
    document: Document,
    config: Config,
    viewport: Viewport,
    capabilities: Capabilities,
    runtime: Runtime,
    /// Native-lazy images waiting to come near the viewport.
    native_deferred: BTreeMap<NodeId, String>,
    carousel: Option<CarouselController>,
    images: Option<ImageActivation>,
    ready: bool,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            config: Config::default(),
            viewport: Viewport::default(),
            capabilities: Capabilities::default(),
            runtime: Runtime::new(Network::default()),
            native_deferred: BTreeMap::new(),
            carousel: None,
            images: None,
            ready: false,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.runtime.network = network;
        self
    }

    /// Initialize page behavior once the document is complete: mount the
    /// carousel, then activate images. Later calls do nothing.
    pub fn ready(&mut self) {
        if self.ready {
            tracing::debug!("page already initialized");
            return;
        }
        self.ready = true;

        let container_id = self.config.carousel.container_id.clone();
        let container = self.document.find_by_id(&container_id);
        match container {
            Some(container) => {
                let mut scheduler = TaggedScheduler::new(&mut self.runtime.timers, HostTask::Autoplay);
                self.carousel = CarouselController::mount(
                    &mut self.document,
                    container,
                    &self.config.carousel,
                    &mut scheduler,
                );
            }
            None => tracing::debug!(%container_id, "carousel container not found"),
        }

        self.images = Some(ImageActivation::activate(
            &mut self.document,
            container,
            self.capabilities,
            &self.config.lazy_load,
            &mut self.runtime,
        ));

        self.pump();
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn now(&self) -> u64 {
        self.runtime.timers.now()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    pub fn images(&self) -> Option<&ImageActivation> {
        self.images.as_ref()
    }

    pub fn network(&self) -> &Network {
        &self.runtime.network
    }

    /// Live repeating timers (autoplay).
    pub fn active_intervals(&self) -> usize {
        self.runtime.timers.interval_count()
    }

    pub fn pending_fetches(&self) -> usize {
        self.runtime.fetches.len()
    }

    // -- user input ----------------------------------------------------------

    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch(target, DomEvent::Click)
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) -> bool {
        self.dispatch(target, DomEvent::KeyDown(key))
    }

    pub fn pointer_enter(&mut self, target: NodeId) -> bool {
        self.dispatch(target, DomEvent::PointerEnter)
    }

    pub fn pointer_leave(&mut self, target: NodeId) -> bool {
        self.dispatch(target, DomEvent::PointerLeave)
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y.max(0.0);
        self.pump();
    }

    /// Deliver `event` to `target`. Returns true when a component handled it.
    pub fn dispatch(&mut self, target: NodeId, event: DomEvent) -> bool {
        let mut handled = false;
        if let Some(carousel) = self.carousel.as_mut() {
            let mut scheduler = TaggedScheduler::new(&mut self.runtime.timers, HostTask::Autoplay);
            handled |= carousel.handle_event(&mut self.document, &mut scheduler, target, &event);
        }
        if let Some(images) = self.images.as_mut() {
            handled |= images.handle_event(&mut self.document, target, &event);
        }
        self.pump();
        handled
    }

    /// Hand intersection entries straight to the image strategy, as a
    /// visibility callback would.
    pub fn deliver_intersections(&mut self, entries: &[IntersectionEntry]) {
        if let Some(images) = self.images.as_mut() {
            images.on_intersection(&mut self.document, entries, &mut self.runtime);
        }
        self.pump();
    }

    // -- time ----------------------------------------------------------------

    pub fn advance(&mut self, ms: u64) {
        let until = self.now() + ms;
        self.advance_to(until);
    }

    /// Run every task due up to `until`, in order, then set the clock there.
    pub fn advance_to(&mut self, until: u64) {
        while let Some(fired) = self.runtime.timers.pop_due(until) {
            self.run_task(fired);
        }
        self.runtime.timers.advance_clock(until);
    }

    /// Advance until no resource fetch is in flight. Autoplay ticks that fall
    /// due on the way fire as usual.
    pub fn settle(&mut self) {
        while let Some(due) = self.runtime.timers.next_timeout_due() {
            self.advance_to(due);
        }
    }

    fn run_task(&mut self, fired: Fired<HostTask>) {
        match fired.payload {
            HostTask::Autoplay => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_tick(&mut self.document, fired.handle);
                }
            }
            HostTask::Fetch(id) => {
                let Some(fetch) = self.runtime.fetches.remove(&id) else {
                    return;
                };
                self.complete_fetch(fetch);
            }
        }
        self.pump();
    }

    fn complete_fetch(&mut self, fetch: PendingFetch) {
        match fetch.target {
            FetchTarget::Element(node) => {
                // A newer src replaced this one; its own fetch reports.
                if self.document.attribute(node, "src") != Some(fetch.url.as_str()) {
                    return;
                }
                let event = match fetch.outcome {
                    FetchOutcome::Loaded => DomEvent::Load,
                    FetchOutcome::Failed => DomEvent::Error,
                };
                self.dispatch(node, event);
            }
            FetchTarget::Detached(id) => {
                if let Some(images) = self.images.as_mut() {
                    images.on_preload_complete(&mut self.document, id, fetch.outcome);
                }
            }
        }
    }

    /// Start fetches for new `src` values and let the visibility observer run,
    /// until the document stops changing.
    fn pump(&mut self) {
        loop {
            for change in self.document.take_src_changes() {
                self.request_image(change);
            }
            if let Some(images) = self.images.as_mut() {
                images.check_visibility(&mut self.document, &self.viewport, &mut self.runtime);
            }
            self.release_native_deferred();
            if !self.document.has_src_changes() {
                break;
            }
        }
    }

    fn request_image(&mut self, change: SrcChange) {
        let SrcChange { node, src } = change;
        if src.is_empty() {
            return;
        }
        let native_lazy = self.capabilities.native_lazy_loading
            && self.document.attribute(node, NATIVE_LAZY_ATTR) == Some("lazy");
        if native_lazy && !self.near_viewport(node) {
            self.native_deferred.insert(node, src);
            return;
        }
        self.native_deferred.remove(&node);
        self.start_element_fetch(node, &src);
    }

    fn start_element_fetch(&mut self, node: NodeId, src: &str) {
        self.runtime.fetch(src, FetchTarget::Element(node));
        if let Some(images) = self.images.as_mut() {
            images.on_fetch_started(node);
        }
    }

    fn release_native_deferred(&mut self) {
        let due: Vec<NodeId> = self
            .native_deferred
            .keys()
            .copied()
            .filter(|node| self.near_viewport(*node))
            .collect();
        for node in due {
            if let Some(src) = self.native_deferred.remove(&node) {
                self.start_element_fetch(node, &src);
            }
        }
    }

    fn near_viewport(&self, node: NodeId) -> bool {
        let lazy = &self.config.lazy_load;
        let root = self
            .viewport
            .rect()
            .expand(lazy.root_margin_px, lazy.root_margin_horizontal_px);
        self.document.rect(node).intersection(&root).is_some()
    }
}
