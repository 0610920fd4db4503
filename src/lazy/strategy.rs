//! Per-image activation: eager for carousel images, deferred for the rest.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::carousel::SLIDE_CLASS;
use crate::config::LazyLoadConfig;
use crate::dom::{Document, DomEvent, NodeId, Viewport};
use crate::host::{Capabilities, FetchOutcome};

use super::observer::{IntersectionEntry, ObserverOptions, VisibilityObserver};
use super::{DEFERRED_SRC_ATTR, ERROR_CLASS, LOADED_CLASS, NATIVE_LAZY_ATTR};

/// How non-carousel images are brought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// The environment defers loading itself.
    Native,
    /// Preload when the image nears the viewport.
    Observer,
    /// No deferral available: preload everything now.
    Eager,
}

impl ActivationMode {
    pub fn select(capabilities: Capabilities) -> Self {
        if capabilities.native_lazy_loading {
            ActivationMode::Native
        } else if capabilities.intersection_observer {
            ActivationMode::Observer
        } else {
            ActivationMode::Eager
        }
    }
}

/// Lifecycle of one managed image. `Loaded` and `Errored` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Deferred,
    Loading,
    Loaded,
    Errored,
}

impl ImageStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, ImageStatus::Loaded | ImageStatus::Errored)
    }
}

/// Identifies a detached preload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreloadId(u64);

impl PreloadId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Starts off-tree image fetches on behalf of the strategy.
pub trait ImageFetcher {
    /// Fetch `url` into a detached image; completion is reported back through
    /// [`ImageActivation::on_preload_complete`].
    fn preload(&mut self, url: &str) -> PreloadId;
}

#[derive(Debug, Clone, Copy)]
struct CarouselImage {
    status: ImageStatus,
    fallback_applied: bool,
}

pub struct ImageActivation {
    mode: ActivationMode,
    fallback_src: String,
    observer: Option<VisibilityObserver>,
    carousel_images: BTreeMap<NodeId, CarouselImage>,
    deferred: BTreeMap<NodeId, ImageStatus>,
    preloads: HashMap<PreloadId, (NodeId, String)>,
}

impl ImageActivation {
    /// Activate carousel images inside `carousel_scope` immediately and set up
    /// deferred loading for every other `img[data-src]`.
    pub fn activate(
        doc: &mut Document,
        carousel_scope: Option<NodeId>,
        capabilities: Capabilities,
        config: &LazyLoadConfig,
        fetcher: &mut dyn ImageFetcher,
    ) -> Self {
        let mode = ActivationMode::select(capabilities);
        let mut activation = Self {
            mode,
            fallback_src: config.fallback_src.clone(),
            observer: (mode == ActivationMode::Observer)
                .then(|| VisibilityObserver::new(ObserverOptions::from(config))),
            carousel_images: BTreeMap::new(),
            deferred: BTreeMap::new(),
            preloads: HashMap::new(),
        };

        if let Some(scope) = carousel_scope {
            for slide in doc.query_class(scope, SLIDE_CLASS) {
                for img in doc.query_tag(slide, "img") {
                    activation.activate_carousel_image(doc, img);
                }
            }
        }

        let qualifying: Vec<NodeId> = doc
            .query_tag(doc.body(), "img")
            .into_iter()
            .filter(|img| doc.has_attribute(*img, DEFERRED_SRC_ATTR))
            .filter(|img| {
                !carousel_scope.is_some_and(|scope| doc.is_inclusive_descendant(*img, scope))
            })
            .collect();

        tracing::info!(
            mode = ?mode,
            carousel_images = activation.carousel_images.len(),
            deferred_images = qualifying.len(),
            "image activation strategy selected"
        );

        for img in qualifying {
            match mode {
                ActivationMode::Native => activation.hand_to_native(doc, img),
                ActivationMode::Observer => {
                    activation.deferred.insert(img, ImageStatus::Deferred);
                    if let Some(observer) = activation.observer.as_mut() {
                        observer.observe(img);
                    }
                }
                ActivationMode::Eager => {
                    activation.deferred.insert(img, ImageStatus::Deferred);
                    activation.begin_preload(doc, img, fetcher);
                }
            }
        }

        activation
    }

    pub fn mode(&self) -> ActivationMode {
        self.mode
    }

    pub fn observer(&self) -> Option<&VisibilityObserver> {
        self.observer.as_ref()
    }

    pub fn is_carousel_image(&self, node: NodeId) -> bool {
        self.carousel_images.contains_key(&node)
    }

    /// Status of a managed image, carousel or deferred.
    pub fn status(&self, node: NodeId) -> Option<ImageStatus> {
        self.carousel_images
            .get(&node)
            .map(|image| image.status)
            .or_else(|| self.deferred.get(&node).copied())
    }

    pub fn pending_preloads(&self) -> usize {
        self.preloads.len()
    }

    fn activate_carousel_image(&mut self, doc: &mut Document, img: NodeId) {
        if let Some(deferred) = doc.remove_attribute(img, DEFERRED_SRC_ATTR) {
            if doc.src(img).is_none() && !deferred.is_empty() {
                doc.set_attribute(img, "src", &deferred);
            }
        }
        doc.remove_attribute(img, NATIVE_LAZY_ATTR);
        self.carousel_images.insert(
            img,
            CarouselImage {
                status: ImageStatus::Loading,
                fallback_applied: false,
            },
        );
    }

    /// Let the environment schedule the fetch. Images that only carry the
    /// deferred source get it as a lazily loaded live source. The image stays
    /// `Deferred` until the host reports the request through
    /// [`ImageActivation::on_fetch_started`].
    fn hand_to_native(&mut self, doc: &mut Document, img: NodeId) {
        if doc.src(img).is_none() {
            let Some(url) = deferred_src(doc, img) else {
                return;
            };
            if !doc.has_attribute(img, NATIVE_LAZY_ATTR) {
                doc.set_attribute(img, NATIVE_LAZY_ATTR, "lazy");
            }
            doc.set_attribute(img, "src", &url);
        }
        self.deferred.insert(img, ImageStatus::Deferred);
    }

    /// The host started fetching the live `src` of `img`. A deferred image
    /// is now loading and its own load/error event will settle it.
    pub fn on_fetch_started(&mut self, img: NodeId) {
        if self.deferred.get(&img) != Some(&ImageStatus::Deferred) || self.has_preload_for(img) {
            return;
        }
        self.stop_observing(img);
        self.deferred.insert(img, ImageStatus::Loading);
    }

    /// Run a visibility check and act on the resulting entries.
    pub fn check_visibility(
        &mut self,
        doc: &mut Document,
        viewport: &Viewport,
        fetcher: &mut dyn ImageFetcher,
    ) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        let entries = observer.take_records(doc, viewport);
        if !entries.is_empty() {
            self.on_intersection(doc, &entries, fetcher);
        }
    }

    /// Handle intersection entries. Only the first intersecting entry for a
    /// still-deferred image starts a fetch.
    pub fn on_intersection(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
        fetcher: &mut dyn ImageFetcher,
    ) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let target = entry.target;
            if self.deferred.get(&target) != Some(&ImageStatus::Deferred) {
                continue;
            }
            if doc.src(target).is_some() {
                // Already has a live source: the element's own load event
                // settles it.
                self.stop_observing(target);
                self.deferred.insert(target, ImageStatus::Loading);
                continue;
            }
            self.begin_preload(doc, target, fetcher);
        }
    }

    fn begin_preload(&mut self, doc: &Document, img: NodeId, fetcher: &mut dyn ImageFetcher) {
        let Some(url) = deferred_src(doc, img) else {
            self.stop_observing(img);
            return;
        };
        let id = fetcher.preload(&url);
        tracing::trace!(src = %url, "preloading deferred image");
        self.preloads.insert(id, (img, url));
        self.deferred.insert(img, ImageStatus::Loading);
    }

    /// A detached preload finished. Returns false for unknown ids.
    pub fn on_preload_complete(
        &mut self,
        doc: &mut Document,
        id: PreloadId,
        outcome: FetchOutcome,
    ) -> bool {
        let Some((img, url)) = self.preloads.remove(&id) else {
            return false;
        };
        match outcome {
            FetchOutcome::Loaded => {
                doc.set_attribute(img, "src", &url);
                self.mark_loaded(doc, img);
            }
            FetchOutcome::Failed => self.mark_failed(doc, img, &url),
        }
        true
    }

    /// Load/error events from live images. Returns true when the image is
    /// managed here.
    pub fn handle_event(&mut self, doc: &mut Document, target: NodeId, event: &DomEvent) -> bool {
        if !matches!(event, DomEvent::Load | DomEvent::Error) {
            return false;
        }
        if self.carousel_images.contains_key(&target) {
            self.on_carousel_image_event(doc, target, event);
            return true;
        }
        match self.deferred.get(&target).copied() {
            Some(status) if !status.is_settled() && !self.has_preload_for(target) => {
                if *event == DomEvent::Load {
                    self.mark_loaded(doc, target);
                } else {
                    let url = doc.src(target).unwrap_or_default().to_string();
                    self.mark_failed(doc, target, &url);
                }
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn on_carousel_image_event(&mut self, doc: &mut Document, img: NodeId, event: &DomEvent) {
        let Some(image) = self.carousel_images.get_mut(&img) else {
            return;
        };
        match event {
            DomEvent::Load if image.status == ImageStatus::Loading => {
                image.status = ImageStatus::Loaded;
                doc.add_class(img, LOADED_CLASS);
            }
            DomEvent::Error if !image.fallback_applied => {
                image.fallback_applied = true;
                image.status = ImageStatus::Errored;
                tracing::warn!(
                    src = doc.src(img).unwrap_or_default(),
                    fallback = %self.fallback_src,
                    "carousel image failed to load, using fallback"
                );
                doc.add_class(img, ERROR_CLASS);
                doc.set_attribute(img, "src", &self.fallback_src);
            }
            DomEvent::Error => {
                tracing::error!(fallback = %self.fallback_src, "fallback image failed to load");
            }
            _ => {}
        }
    }

    fn mark_loaded(&mut self, doc: &mut Document, img: NodeId) {
        if self.deferred.get(&img).is_some_and(|s| s.is_settled()) {
            return;
        }
        doc.remove_attribute(img, DEFERRED_SRC_ATTR);
        doc.add_class(img, LOADED_CLASS);
        doc.set_style(img, "opacity", "1");
        self.deferred.insert(img, ImageStatus::Loaded);
        self.stop_observing(img);
        tracing::debug!(src = doc.src(img).unwrap_or_default(), "image loaded");
    }

    fn mark_failed(&mut self, doc: &mut Document, img: NodeId, url: &str) {
        if self.deferred.get(&img).is_some_and(|s| s.is_settled()) {
            return;
        }
        doc.add_class(img, ERROR_CLASS);
        doc.set_style(img, "opacity", "1");
        self.deferred.insert(img, ImageStatus::Errored);
        self.stop_observing(img);
        tracing::error!(src = %url, "failed to load image");
    }

    fn stop_observing(&mut self, img: NodeId) {
        if let Some(observer) = self.observer.as_mut() {
            observer.unobserve(img);
        }
    }

    fn has_preload_for(&self, img: NodeId) -> bool {
        self.preloads.values().any(|(node, _)| *node == img)
    }
}

fn deferred_src(doc: &Document, img: NodeId) -> Option<String> {
    doc.attribute(img, DEFERRED_SRC_ATTR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
