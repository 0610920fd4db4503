mod common;

use common::{ready_carousel, slide_sources, three_slide_page, visible_slides};
use media_carousel::carousel::{
    CarouselController, CarouselParts, StructureError, ACTIVE_CLASS, DOTS_CLASS,
};
use media_carousel::config::CarouselConfig;
use media_carousel::dom::{Document, Key};
use media_carousel::host::{Capabilities, TaggedScheduler, TimerQueue};
use media_carousel::scenario::build_carousel;
use media_carousel::Page;

fn mounted() -> (Document, CarouselController, TimerQueue<()>) {
    let mut doc = Document::new();
    let body = doc.body();
    let markup = build_carousel(&mut doc, body, "media-container", &slide_sources(), false);
    let mut timers = TimerQueue::new();
    let controller = {
        let mut scheduler = TaggedScheduler::new(&mut timers, ());
        CarouselController::mount(
            &mut doc,
            markup.container,
            &CarouselConfig::default(),
            &mut scheduler,
        )
        .expect("complete structure mounts")
    };
    (doc, controller, timers)
}

#[test]
fn first_slide_visible_after_mount() {
    let (page, markup) = ready_carousel();
    assert_eq!(visible_slides(&page, &markup), vec![0]);
    let doc = page.document();
    assert!(doc.has_class(markup.dots[0], ACTIVE_CLASS));
    assert_eq!(doc.attribute(markup.dots[0], "aria-selected"), Some("true"));
    assert_eq!(doc.attribute(markup.dots[1], "aria-selected"), Some("false"));
    assert_eq!(doc.attribute(markup.dots[1], "tabindex"), Some("-1"));
}

#[test]
fn layout_styles_applied_on_mount() {
    let (page, markup) = ready_carousel();
    let doc = page.document();
    assert_eq!(doc.style(markup.slider, "height"), Some("400px"));
    assert_eq!(doc.style(markup.slider, "overflow"), Some("hidden"));
    assert_eq!(doc.style(markup.slides[1], "position"), Some("absolute"));
    assert_eq!(
        doc.style(markup.slides[1], "transition"),
        Some("opacity 0.5s ease")
    );
    assert_eq!(doc.style(markup.images[0], "object-fit"), Some("cover"));
}

#[test]
fn exactly_one_slide_visible_through_navigation() {
    let (mut page, markup) = ready_carousel();
    for expected in [1, 2, 0, 1] {
        assert!(page.click(markup.next));
        assert_eq!(visible_slides(&page, &markup), vec![expected]);
        let active_dots: Vec<_> = markup
            .dots
            .iter()
            .filter(|dot| page.document().has_class(**dot, ACTIVE_CLASS))
            .collect();
        assert_eq!(active_dots, vec![&markup.dots[expected]]);
    }
}

#[test]
fn previous_from_first_wraps_to_last() {
    let (mut page, markup) = ready_carousel();
    page.click(markup.previous);
    assert_eq!(page.carousel().map(|c| c.current_index()), Some(2));
    assert_eq!(visible_slides(&page, &markup), vec![2]);
}

#[test]
fn go_to_normalizes_out_of_range_indexes() {
    let (mut doc, mut controller, _timers) = mounted();
    controller.go_to(&mut doc, -3);
    assert_eq!(controller.current_index(), 2);
    controller.go_to(&mut doc, 3);
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn go_to_current_twice_changes_nothing() {
    let (mut doc, mut controller, _timers) = mounted();
    controller.go_to(&mut doc, 1);
    let snapshot = doc.clone();
    controller.go_to(&mut doc, 1);
    for slide in &controller.parts().slides {
        assert_eq!(doc.style(*slide, "opacity"), snapshot.style(*slide, "opacity"));
    }
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn dot_click_selects_slide() {
    let (mut page, markup) = ready_carousel();
    assert!(page.click(markup.dots[2]));
    assert_eq!(visible_slides(&page, &markup), vec![2]);
    assert_eq!(page.document().attribute(markup.dots[2], "tabindex"), Some("0"));
}

#[test]
fn enter_and_space_on_dot_activate() {
    let (mut page, markup) = ready_carousel();
    assert!(page.key_down(markup.dots[1], Key::Enter));
    assert_eq!(visible_slides(&page, &markup), vec![1]);
    assert!(page.key_down(markup.dots[2], Key::from_key_value(" ")));
    assert_eq!(visible_slides(&page, &markup), vec![2]);
}

#[test]
fn other_keys_are_not_handled() {
    let (mut page, markup) = ready_carousel();
    assert!(!page.key_down(markup.dots[1], Key::Other("a".to_string())));
    assert!(!page.key_down(markup.dots[1], Key::Tab));
    assert_eq!(visible_slides(&page, &markup), vec![0]);
}

#[test]
fn click_outside_carousel_is_ignored() {
    let (mut page, markup) = ready_carousel();
    let body = page.document().body();
    let stray = page.document_mut().append_element(body, "button");
    assert!(!page.click(stray));
    assert!(!page.click(markup.container));
    assert_eq!(visible_slides(&page, &markup), vec![0]);
}

#[test]
fn missing_dots_means_no_carousel() {
    let (mut page, markup) = three_slide_page(Capabilities::observer_only());
    let dots_root = page
        .document()
        .query_first_class(markup.container, DOTS_CLASS)
        .expect("markup has dots");
    page.document_mut().remove_class(dots_root, DOTS_CLASS);
    page.ready();

    assert!(page.carousel().is_none());
    assert_eq!(page.active_intervals(), 0);
    assert!(!page.click(markup.next));
    assert_eq!(page.document().style(markup.slides[0], "opacity"), None);
}

#[test]
fn missing_container_means_no_carousel() {
    let mut page = Page::new(Document::new());
    page.ready();
    assert!(page.carousel().is_none());
    assert_eq!(page.active_intervals(), 0);
}

#[test]
fn indicator_count_mismatch_is_rejected() {
    let mut doc = Document::new();
    let body = doc.body();
    let markup = build_carousel(&mut doc, body, "media-container", &slide_sources(), false);
    let mut parts = CarouselParts::discover(&doc, markup.container).expect("complete");
    parts.dots.pop();
    assert_eq!(
        parts.validate(),
        Err(StructureError::IndicatorMismatch { slides: 3, dots: 2 })
    );

    let mut timers: TimerQueue<()> = TimerQueue::new();
    let mut scheduler = TaggedScheduler::new(&mut timers, ());
    let controller =
        CarouselController::from_parts(&mut doc, parts, &CarouselConfig::default(), &mut scheduler);
    assert!(controller.is_none());
    assert_eq!(timers.pending_count(), 0);
}

#[test]
fn ready_twice_mounts_once() {
    let (mut page, markup) = ready_carousel();
    assert!(page.is_ready());
    page.ready();
    assert!(page.is_ready());
    assert_eq!(page.active_intervals(), 1);
    assert_eq!(visible_slides(&page, &markup), vec![0]);
}
