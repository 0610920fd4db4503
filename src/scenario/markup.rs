//! Builders for the markup the carousel and image strategy expect.

use crate::carousel::{DOTS_CLASS, DOT_CLASS, NEXT_CLASS, PREV_CLASS, SLIDER_CLASS, SLIDE_CLASS};
use crate::dom::{Document, NodeId, Rect};
use crate::lazy::{DEFERRED_SRC_ATTR, NATIVE_LAZY_ATTR};

/// Vertical offset of the carousel block.
pub const CAROUSEL_TOP: f64 = 80.0;
pub const CAROUSEL_HEIGHT: f64 = 400.0;
const PAGE_WIDTH: f64 = 1280.0;

/// Node ids of a carousel built by [`build_carousel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselMarkup {
    pub container: NodeId,
    pub slider: NodeId,
    pub slides: Vec<NodeId>,
    pub images: Vec<NodeId>,
    pub dots: Vec<NodeId>,
    pub previous: NodeId,
    pub next: NodeId,
}

/// Build
///
/// ```text
/// div#<id>
///   div.slider > div.slide > img   (one per source)
///   div.dots   > span.dot          (one per source)
///   button.prev-btn, button.next-btn
/// ```
///
/// With `deferred` the sources go into `data-src` and the images carry
/// `loading="lazy"`, as page markup usually does.
pub fn build_carousel(
    doc: &mut Document,
    parent: NodeId,
    container_id: &str,
    sources: &[String],
    deferred: bool,
) -> CarouselMarkup {
    let block = Rect::new(0.0, CAROUSEL_TOP, PAGE_WIDTH, CAROUSEL_HEIGHT);

    let container = doc.append_element(parent, "div");
    doc.set_id(container, container_id);
    doc.set_rect(container, block);

    let slider = doc.append_element(container, "div");
    doc.add_class(slider, SLIDER_CLASS);
    doc.set_rect(slider, block);

    let mut slides = Vec::with_capacity(sources.len());
    let mut images = Vec::with_capacity(sources.len());
    for (index, src) in sources.iter().enumerate() {
        let slide = doc.append_element(slider, "div");
        doc.add_class(slide, SLIDE_CLASS);
        doc.set_rect(slide, block);
        let img = doc.append_element(slide, "img");
        doc.set_attribute(img, "alt", &format!("Slide {}", index + 1));
        doc.set_rect(img, block);
        if deferred {
            doc.set_attribute(img, DEFERRED_SRC_ATTR, src);
            doc.set_attribute(img, NATIVE_LAZY_ATTR, "lazy");
        } else {
            doc.set_attribute(img, "src", src);
        }
        slides.push(slide);
        images.push(img);
    }

    let dots_root = doc.append_element(container, "div");
    doc.add_class(dots_root, DOTS_CLASS);
    let dots = (0..sources.len())
        .map(|index| {
            let dot = doc.append_element(dots_root, "span");
            doc.add_class(dot, DOT_CLASS);
            doc.set_attribute(dot, "role", "tab");
            doc.set_attribute(dot, "aria-label", &format!("Go to slide {}", index + 1));
            dot
        })
        .collect();

    let previous = doc.append_element(container, "button");
    doc.add_class(previous, PREV_CLASS);
    let next = doc.append_element(container, "button");
    doc.add_class(next, NEXT_CLASS);

    CarouselMarkup {
        container,
        slider,
        slides,
        images,
        dots,
        previous,
        next,
    }
}

/// Append an image placed at `top` with the given height.
///
/// `deferred` puts `src` into `data-src`; `native_lazy` adds
/// `loading="lazy"`.
pub fn append_image(
    doc: &mut Document,
    parent: NodeId,
    src: &str,
    top: f64,
    height: f64,
    deferred: bool,
    native_lazy: bool,
) -> NodeId {
    let img = doc.append_element(parent, "img");
    doc.set_rect(img, Rect::new(0.0, top, PAGE_WIDTH / 2.0, height));
    if native_lazy {
        doc.set_attribute(img, NATIVE_LAZY_ATTR, "lazy");
    }
    if deferred {
        doc.set_attribute(img, DEFERRED_SRC_ATTR, src);
    } else {
        doc.set_attribute(img, "src", src);
    }
    img
}
