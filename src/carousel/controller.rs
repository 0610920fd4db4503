//! Carousel controller: dispatches intents, renders, and owns the autoplay
//! timer slot.

use crate::config::CarouselConfig;
use crate::dom::{Document, DomEvent, NodeId};
use crate::host::{Scheduler, TimerHandle};
use crate::mvi::Reducer;

use super::intent::CarouselIntent;
use super::parts::CarouselParts;
use super::reducer::CarouselReducer;
use super::state::CarouselState;
use super::view;

pub struct CarouselController {
    parts: CarouselParts,
    state: CarouselState,
    /// The only live autoplay interval, if any.
    autoplay: Option<TimerHandle>,
    interval_ms: u64,
}

impl CarouselController {
    /// Discover the structure inside `container` and mount on it.
    ///
    /// Returns `None` when the structure is incomplete; the page simply goes
    /// without a carousel.
    pub fn mount(
        doc: &mut Document,
        container: NodeId,
        config: &CarouselConfig,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Self> {
        match CarouselParts::discover(doc, container) {
            Ok(parts) => Self::from_parts(doc, parts, config, scheduler),
            Err(reason) => {
                tracing::debug!(%reason, "carousel structure incomplete, not mounting");
                None
            }
        }
    }

    /// Mount on explicitly supplied parts.
    pub fn from_parts(
        doc: &mut Document,
        parts: CarouselParts,
        config: &CarouselConfig,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Self> {
        if let Err(reason) = parts.validate() {
            tracing::debug!(%reason, "carousel parts rejected, not mounting");
            return None;
        }

        view::apply_layout(doc, &parts, config);

        let mut controller = Self {
            state: CarouselState::Inactive,
            autoplay: None,
            interval_ms: config.autoplay_interval_ms,
            parts,
        };
        let slide_count = controller.parts.slides.len();
        controller.dispatch(doc, CarouselIntent::Mount { slide_count });
        controller.go_to(doc, 0);
        controller.start_autoplay(scheduler);

        tracing::debug!(slides = slide_count, "carousel mounted");
        Some(controller)
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn parts(&self) -> &CarouselParts {
        &self.parts
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index().unwrap_or(0)
    }

    pub fn slide_count(&self) -> usize {
        self.state.slide_count()
    }

    pub fn go_to(&mut self, doc: &mut Document, index: isize) {
        self.dispatch(doc, CarouselIntent::GoTo { index });
    }

    pub fn next(&mut self, doc: &mut Document) {
        self.dispatch(doc, CarouselIntent::Next);
    }

    pub fn previous(&mut self, doc: &mut Document) {
        self.dispatch(doc, CarouselIntent::Previous);
    }

    /// (Re)start autoplay. Any running interval is cancelled first so at most
    /// one exists.
    pub fn start_autoplay(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.autoplay.take() {
            scheduler.clear_interval(handle);
        }
        let handle = scheduler.set_interval(self.interval_ms);
        self.autoplay = Some(handle);
        self.state = CarouselReducer::reduce(
            std::mem::take(&mut self.state),
            CarouselIntent::AutoplayStarted,
        );
        tracing::trace!(?handle, interval_ms = self.interval_ms, "autoplay started");
    }

    pub fn stop_autoplay(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.autoplay.take() {
            scheduler.clear_interval(handle);
            tracing::trace!(?handle, "autoplay stopped");
        }
        self.state = CarouselReducer::reduce(
            std::mem::take(&mut self.state),
            CarouselIntent::AutoplayStopped,
        );
    }

    /// Autoplay interval fired. Ticks from a cancelled handle are dropped.
    pub fn on_tick(&mut self, doc: &mut Document, handle: TimerHandle) -> bool {
        if self.autoplay != Some(handle) {
            return false;
        }
        self.dispatch(doc, CarouselIntent::Tick);
        true
    }

    /// Route a DOM event. Returns true when the carousel handled it (for key
    /// events this means the default action is prevented).
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        scheduler: &mut dyn Scheduler,
        target: NodeId,
        event: &DomEvent,
    ) -> bool {
        match event {
            DomEvent::Click => {
                if doc.is_inclusive_descendant(target, self.parts.previous) {
                    self.previous(doc);
                    true
                } else if doc.is_inclusive_descendant(target, self.parts.next) {
                    self.next(doc);
                    true
                } else if let Some(index) = self.parts.indicator_index(doc, target) {
                    self.go_to(doc, index as isize);
                    true
                } else {
                    false
                }
            }
            DomEvent::KeyDown(key) if key.activates() => {
                match self.parts.indicator_index(doc, target) {
                    Some(index) => {
                        self.go_to(doc, index as isize);
                        true
                    }
                    None => false,
                }
            }
            // Enter/leave do not bubble: only the slider root itself counts.
            DomEvent::PointerEnter if target == self.parts.slider => {
                self.stop_autoplay(scheduler);
                true
            }
            DomEvent::PointerLeave if target == self.parts.slider => {
                self.start_autoplay(scheduler);
                true
            }
            _ => false,
        }
    }

    fn dispatch(&mut self, doc: &mut Document, intent: CarouselIntent) {
        let before = self.state.current_index();
        self.state = CarouselReducer::reduce(std::mem::take(&mut self.state), intent);
        match self.state.current_index() {
            Some(current) if before != Some(current) => {
                view::render(doc, &self.parts, current);
            }
            _ => {}
        }
    }
}
