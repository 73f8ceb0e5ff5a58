use std::rc::Rc;

use amalgated_core::TestClock;
use amalgated_platform::{PlatformError, RunReport, ScrollScript, run_headless_with};
use amalgated_site::{PageOptions, SiteError};
use web_time::Duration;

fn run(options: &PageOptions, script: &ScrollScript) -> Result<RunReport, PlatformError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let clock = TestClock::new();
    run_headless_with(options, script, Rc::new(clock.clone()), |d| clock.advance(d))
}

#[test]
fn full_scroll_sees_every_section_in_order() {
    let options = PageOptions::default();
    let script = ScrollScript::new()
        .speed(20_000.0)
        .settle(Duration::from_secs(3));
    let report = run(&options, &script).unwrap();

    let order: Vec<&str> = report.seen.iter().map(|(a, _)| *a).collect();
    assert_eq!(
        order,
        [
            "top",
            "journey",
            "about-us",
            "vision-mission",
            "business-models",
            "services",
            "project-101",
            "asset-management",
            "our-clients",
            "performance-metrics",
            "contact",
            "footer",
        ]
    );
    assert!(report.seen.windows(2).all(|w| w[0].1 <= w[1].1));
    assert_eq!(report.seen_at("#top"), Some(Duration::ZERO));
    assert_eq!(report.final_scroll, 11_860.0);
    assert_eq!(report.leaked_tasks, 0);
    assert!(report.frames_run > 0);
}

#[test]
fn stopping_at_a_target_lets_its_counters_finish() {
    let options = PageOptions::default();
    let script = ScrollScript::new()
        .speed(20_000.0)
        .target("#performance-metrics")
        .settle(Duration::from_secs(3));
    let report = run(&options, &script).unwrap();

    assert_eq!(report.final_scroll, 10_960.0);
    let texts = report.texts_of("performance-metrics");
    assert!(texts.contains(&"88%"));
    assert!(texts.contains(&"Target: 500M by 2025"));
    // the next section only touches the viewport's bottom edge
    assert_eq!(report.seen_at("contact"), None);
    assert_eq!(report.leaked_tasks, 0);
}

#[test]
fn a_slow_script_stops_at_its_limit() {
    let options = PageOptions::default();
    let script = ScrollScript::new()
        .speed(1.0)
        .max_duration(Duration::from_millis(500));
    let report = run(&options, &script).unwrap();

    assert!(report.elapsed >= Duration::from_millis(500));
    assert!(report.elapsed < Duration::from_millis(520));
    assert!(report.final_scroll < 1.0);
    assert_eq!(report.seen_at("about-us"), None);
}

#[test]
fn start_delay_holds_the_page_at_the_top() {
    let options = PageOptions::default();
    let script = ScrollScript::new()
        .speed(10_000.0)
        .start_delay(Duration::from_millis(400))
        .target("journey")
        .settle(Duration::ZERO);
    let report = run(&options, &script).unwrap();

    let journey = report.seen_at("journey").unwrap();
    assert!(journey > Duration::from_millis(400));
    assert_eq!(report.final_scroll, 800.0);
}

#[test]
fn unknown_target_is_reported() {
    let script = ScrollScript::new().target("#nowhere");
    match run(&PageOptions::default(), &script) {
        Err(PlatformError::Site(SiteError::UnknownAnchor(anchor))) => assert_eq!(anchor, "nowhere"),
        other => panic!("expected an unknown anchor, got {other:?}"),
    }
}

#[test]
fn non_positive_speed_is_rejected() {
    let script = ScrollScript::new().speed(0.0);
    assert!(matches!(
        run(&PageOptions::default(), &script),
        Err(PlatformError::InvalidSpeed(_))
    ));
}
