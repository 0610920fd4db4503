mod common;

use media_carousel::config::Config;
use media_carousel::lazy::ImageStatus;
use media_carousel::scenario::{Scenario, ScenarioError, Step};

const TOUR: &str = r#"
[viewport]
width = 1280.0
height = 800.0

[network]
latency_ms = 50
available = ["images/a.jpg", "images/b.jpg", "images/c.jpg", "images/below.jpg"]

[carousel]
slides = ["images/a.jpg", "images/b.jpg", "images/missing.jpg"]

[[images]]
src = "images/below.jpg"
top = 2400.0

[[steps]]
action = "settle"

[[steps]]
action = "advance"
ms = 3950

[[steps]]
action = "hover"

[[steps]]
action = "advance"
ms = 8000

[[steps]]
action = "leave"

[[steps]]
action = "dot"
index = 2

[[steps]]
action = "key"
index = 0
key = "enter"

[[steps]]
action = "scroll"
y = 2000.0

[[steps]]
action = "settle"
"#;

#[test]
fn parses_steps_and_defaults() {
    let scenario = Scenario::parse(TOUR, "tour").expect("valid scenario");
    assert_eq!(scenario.steps.len(), 9);
    assert_eq!(scenario.steps[1], Step::Advance { ms: 3950 });
    assert_eq!(
        scenario.steps[6],
        Step::Key {
            index: 0,
            key: "enter".to_string()
        }
    );
    assert!(scenario.carousel.as_ref().is_some_and(|c| c.deferred));
    assert_eq!(scenario.images[0].height, 300.0);
    assert!(scenario.capabilities.intersection_observer);
}

#[test]
fn run_produces_one_snapshot_per_step() {
    let scenario = Scenario::parse(TOUR, "tour").expect("valid scenario");
    let snapshots = scenario.run(Config::default());
    assert_eq!(snapshots.len(), scenario.steps.len() + 1);
    assert_eq!(snapshots[0].step, "ready");
    assert_eq!(snapshots[0].current_slide, Some(0));
    assert!(snapshots[0].autoplay);

    // settle: slide images resolved, the missing one fell back.
    let settled = &snapshots[1];
    assert_eq!(settled.images[0].status, Some(ImageStatus::Loaded));
    assert_eq!(settled.images[2].status, Some(ImageStatus::Errored));
    assert_eq!(settled.images[2].src.as_deref(), Some("images/fallback.jpg"));
    assert_eq!(settled.images[3].label, "image-0");
    assert_eq!(settled.images[3].status, Some(ImageStatus::Deferred));

    // settle ended at t=100; advancing to t=4050 crosses one tick.
    assert_eq!(snapshots[1].time_ms, 100);
    assert_eq!(snapshots[2].time_ms, 4050);
    assert_eq!(snapshots[2].current_slide, Some(1));

    // hovered for 8s: no advance.
    assert!(!snapshots[3].autoplay);
    assert_eq!(snapshots[4].current_slide, Some(1));

    assert!(snapshots[5].autoplay);
    assert_eq!(snapshots[6].current_slide, Some(2));
    assert_eq!(snapshots[7].current_slide, Some(0));

    let last = snapshots.last().expect("snapshots");
    assert_eq!(last.images[3].status, Some(ImageStatus::Loaded));
    assert_eq!(last.images[3].src.as_deref(), Some("images/below.jpg"));
}

#[test]
fn snapshots_serialize_to_json() {
    let scenario = Scenario::parse(TOUR, "tour").expect("valid scenario");
    let snapshots = scenario.run(Config::default());
    let json = serde_json::to_value(&snapshots[1]).expect("serializable");
    assert_eq!(json["images"][0]["status"], "loaded");
    assert_eq!(json["images"][2]["status"], "errored");
}

#[test]
fn carousel_steps_require_a_carousel() {
    let err = Scenario::parse("[[steps]]\naction = \"next\"\n", "inline").unwrap_err();
    match err {
        ScenarioError::Invalid { message } => assert!(message.contains("needs a carousel")),
        other => panic!("Expected Invalid, got {:?}", other),
    }
}

#[test]
fn dot_index_must_exist() {
    let content = r#"
[carousel]
slides = ["a.jpg", "b.jpg"]

[[steps]]
action = "dot"
index = 2
"#;
    assert!(matches!(
        Scenario::parse(content, "inline"),
        Err(ScenarioError::Invalid { .. })
    ));
}

#[test]
fn unknown_action_is_a_parse_error() {
    let err = Scenario::parse("[[steps]]\naction = \"jump\"\n", "inline").unwrap_err();
    assert!(matches!(err, ScenarioError::ParseError { .. }));
    assert!(err.to_string().contains("inline"));
}

#[test]
fn load_from_reads_file() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("tour.toml");
    std::fs::write(&path, TOUR).expect("write scenario");
    let scenario = Scenario::load_from(&path).expect("valid scenario");
    assert_eq!(scenario.images.len(), 1);

    let missing = Scenario::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(missing, Err(ScenarioError::ReadError { .. })));
}

#[test]
fn native_capability_defers_far_images() {
    let content = r#"
[capabilities]
native_lazy_loading = true

[network]
available = ["images/far.jpg"]

[[images]]
src = "images/far.jpg"
top = 5000.0
"#;
    let scenario = Scenario::parse(content, "inline").expect("valid");
    let page = {
        let mut page = scenario.build_page(Config::default());
        page.ready();
        page.settle();
        page
    };
    assert_eq!(page.network().fetch_count("images/far.jpg"), 0);
    assert!(page.carousel().is_none());
}
