use amalgated_core::{Clock, FrameLoop};
use amalgated_platform::{Patch, patches};
use amalgated_site::{Page, PageOptions};
use web_time::Duration;

fn find<'a>(patches: &'a [Patch<'a>], key: &str) -> &'a Patch<'a> {
    patches
        .iter()
        .find(|p| p.key == key)
        .unwrap_or_else(|| panic!("no patch for {key}"))
}

#[test]
fn counters_and_bars_reach_the_document() {
    let options = PageOptions::default();
    let (frames, clock) = FrameLoop::manual();
    let page = Page::mount(&options, options.load_assets().unwrap(), frames.clone());

    let before = page.frame(clock.now());
    let before = patches(&before);
    assert_eq!(find(&before, "perf-count-accounts").text, Some("0+"));
    assert_eq!(find(&before, "perf-bar-secured-loans-rem").style("width"), Some("0.0%"));
    let row = find(&before, "perf-metric-accounts");
    assert_eq!(row.style("opacity"), Some("0"));
    assert_eq!(
        row.style("transform"),
        Some("translate(-12px, 0px) scale(1) scaleX(1) scaleY(1)")
    );

    page.scroll_to_anchor("performance-metrics").unwrap();
    frames.advance(&clock, Duration::from_millis(2000));
    let after = page.frame(clock.now());
    let after = patches(&after);

    let texts: Vec<(&str, &str)> = after
        .iter()
        .filter(|p| p.key.starts_with("perf-count-"))
        .filter_map(|p| Some((p.key, p.text?)))
        .collect();
    assert_eq!(
        texts,
        [
            ("perf-count-accounts", "1000+"),
            ("perf-count-collection-efficiency", "88%"),
            ("perf-count-annual-sales-growth", "15\u{2013}20%"),
            ("perf-count-secured-loans-rem", "75%"),
            ("perf-count-sss-gsis-pension", "15%"),
            ("perf-count-travel-assistance", "10%"),
            ("perf-count-target", "Target: 500M by 2025"),
        ]
    );
    let widths: Vec<&str> = ["secured-loans-rem", "sss-gsis-pension", "travel-assistance"]
        .iter()
        .filter_map(|s| find(&after, &format!("perf-bar-{s}")).style("width"))
        .collect();
    assert_eq!(widths, ["75.0%", "15.0%", "10.0%"]);
    assert_eq!(find(&after, "perf-metric-accounts").style("opacity"), Some("1"));
}

#[test]
fn roadmap_and_asset_counters_are_keyed() {
    let options = PageOptions::default();
    let (frames, clock) = FrameLoop::manual();
    let page = Page::mount(&options, options.load_assets().unwrap(), frames.clone());
    page.scroll_to_anchor("project-101").unwrap();
    frames.advance(&clock, Duration::from_millis(2000));

    let view = page.frame(clock.now());
    let counted: Vec<&str> = patches(&view)
        .into_iter()
        .filter(|p| p.key.starts_with("project101-") && p.key.ends_with("-count"))
        .filter_map(|p| p.text)
        .collect();
    assert_eq!(counted.len(), 3);
    assert!(counted.contains(&"1,001"), "{counted:?}");

    let assets = patches(&view)
        .into_iter()
        .filter(|p| p.key.starts_with("assets-") && p.key.ends_with("-count"))
        .count();
    assert!(assets > 0);
}
