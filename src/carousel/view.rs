//! Document mutations for the carousel: static layout and per-index render.

use crate::config::CarouselConfig;
use crate::dom::Document;

use super::parts::CarouselParts;

pub const ACTIVE_CLASS: &str = "active";

/// Apply the inline sizing every carousel needs regardless of stylesheet.
pub fn apply_layout(doc: &mut Document, parts: &CarouselParts, config: &CarouselConfig) {
    doc.set_style(parts.slider, "width", "100%");
    doc.set_style(parts.slider, "height", &config.height);
    doc.set_style(parts.slider, "position", "relative");
    doc.set_style(parts.slider, "overflow", "hidden");

    let transition = opacity_transition(config.fade_duration_ms);
    for (index, slide) in parts.slides.iter().enumerate() {
        doc.set_style(*slide, "position", "absolute");
        doc.set_style(*slide, "top", "0");
        doc.set_style(*slide, "left", "0");
        doc.set_style(*slide, "width", "100%");
        doc.set_style(*slide, "height", "100%");
        doc.set_style(*slide, "opacity", if index == 0 { "1" } else { "0" });
        doc.set_style(*slide, "transition", &transition);

        if let Some(img) = parts.slide_image(doc, *slide) {
            for property in ["width", "height", "max-width", "max-height"] {
                doc.set_style(img, property, "100%");
            }
            doc.set_style(img, "object-fit", "cover");
            doc.set_style(img, "opacity", "1");
        }
    }
}

/// Show slide `current`, hide the rest and sync the indicators.
pub fn render(doc: &mut Document, parts: &CarouselParts, current: usize) {
    for (index, slide) in parts.slides.iter().enumerate() {
        let visible = index == current;
        doc.set_style(*slide, "opacity", if visible { "1" } else { "0" });
        doc.toggle_class(*slide, ACTIVE_CLASS, visible);
    }

    for (index, dot) in parts.dots.iter().enumerate() {
        let selected = index == current;
        doc.toggle_class(*dot, ACTIVE_CLASS, selected);
        doc.set_attribute(*dot, "aria-selected", if selected { "true" } else { "false" });
        // Roving tabindex: only the selected indicator is in tab order.
        doc.set_attribute(*dot, "tabindex", if selected { "0" } else { "-1" });
    }
}

/// True when slide `index` is rendered as visible.
pub fn is_slide_visible(doc: &Document, parts: &CarouselParts, index: usize) -> bool {
    parts
        .slides
        .get(index)
        .is_some_and(|slide| doc.style(*slide, "opacity") == Some("1"))
}

fn opacity_transition(fade_ms: u64) -> String {
    format!("opacity {}s ease", fade_ms as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_uses_seconds() {
        assert_eq!(opacity_transition(500), "opacity 0.5s ease");
        assert_eq!(opacity_transition(1000), "opacity 1s ease");
    }
}
