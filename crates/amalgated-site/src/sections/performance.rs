use amalgated_core::{
    CountUpAnimator, CountUpOptions, Motion, RevealChoreographer, RevealNode, Stagger,
    VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug, tween_node};
use crate::content::{MetricValue, PERF_METRICS, PORTFOLIO_RATIO, PerfMetric};
use crate::format::CountFormat;
use crate::view::*;

const ANCHOR: &str = "performance-metrics";
const COUNT_MS: i64 = 1400;
const FINANCING_TARGET: f64 = 500.0;

enum MetricCounter {
    Single(CountUpAnimator),
    Range(CountUpAnimator, CountUpAnimator),
}

/// Lending performance card next to the portfolio-ratio card.
pub struct PerformanceSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    metrics: Vec<(&'static PerfMetric, MetricCounter)>,
    ratio: Vec<CountUpAnimator>,
    target: CountUpAnimator,
}

fn metric_key(metric: &PerfMetric) -> String {
    format!("perf-metric-{}", slug(metric.label))
}

fn bar_key(label: &str) -> String {
    format!("perf-bar-{}", slug(label))
}

fn legend_key(label: &str) -> String {
    format!("perf-legend-{}", slug(label))
}

fn count_key(label: &str) -> String {
    format!("perf-count-{}", slug(label))
}

impl PerformanceSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.08).once());
        let rows = PERF_METRICS
            .iter()
            .map(|m| ease_node(&metric_key(m), Motion::slide_x(-12.0), 500, 0));
        let bars = PORTFOLIO_RATIO
            .iter()
            .map(|s| ease_node(&bar_key(s.label), Motion::grow_x(), 1000, 0));
        let legend = PORTFOLIO_RATIO
            .iter()
            .map(|s| ease_node(&legend_key(s.label), Motion::fade_up(10.0), 450, 0));
        let root = RevealNode::new("perf").children([
            ease_node("perf-metrics-card", Motion::fade_up(24.0), 600, 0),
            tween_node("perf-orb", Motion::zoom_in(0.8), 400, 100),
            tween_node("perf-heading", Motion::slide_x(-8.0), 500, 150),
            RevealNode::group("perf-metrics", 120, 200).children(rows),
            ease_node("perf-nextgen-card", Motion::fade_up(24.0), 600, 100),
            tween_node("perf-badge", Motion::zoom_in(0.8), 350, 300),
            tween_node("perf-bars", Motion::fade_in(), 400, 200)
                .stagger(Stagger::ms(100, 150))
                .children(bars),
            RevealNode::group("perf-legend", 100, 250).children(legend),
            tween_node("perf-footnote", Motion::fade_in(), 500, 600),
        ]);
        let reveal = ctx.reveal(root, &tracker);

        let count = |end: f64| ctx.count_up(end, &tracker, CountUpOptions::duration_ms(COUNT_MS));
        let metrics = PERF_METRICS
            .iter()
            .map(|m| {
                let counter = match m.value {
                    MetricValue::Single(end) => MetricCounter::Single(count(end)),
                    MetricValue::Range(low, high) => MetricCounter::Range(count(low), count(high)),
                };
                (m, counter)
            })
            .collect();
        let ratio = PORTFOLIO_RATIO.iter().map(|s| count(s.pct)).collect();
        let target = count(FINANCING_TARGET);
        Self {
            tracker,
            reveal,
            metrics,
            ratio,
            target,
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }

    /// Formatted metric values, e.g. `1000+`, `88%`, `15–20%`.
    pub fn metric_texts(&self) -> Vec<String> {
        self.metrics
            .iter()
            .map(|(metric, counter)| {
                let fmt = CountFormat::plain().suffix(metric.suffix);
                match counter {
                    MetricCounter::Single(c) => fmt.format(c.value()),
                    MetricCounter::Range(lo, hi) => fmt.format_range(lo.value(), hi.value()),
                }
            })
            .collect()
    }

    pub fn ratio_texts(&self) -> Vec<String> {
        let fmt = CountFormat::plain().suffix("%");
        self.ratio.iter().map(|c| fmt.format(c.value())).collect()
    }
}

impl PageSection for PerformanceSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let rows: Vec<View> = self
            .metrics
            .iter()
            .zip(self.metric_texts())
            .map(|((metric, _), text)| {
                Column()
                    .reveal(r, &metric_key(metric), now)
                    .child((Counter(text).key(count_key(metric.label)), Body(metric.label)))
            })
            .collect();
        let bars: Vec<View> = PORTFOLIO_RATIO
            .iter()
            .map(|slice| {
                let key = bar_key(slice.label);
                let grown = r.pose(&key, now).scale_x;
                Bar(slice.pct as f32 / 100.0 * grown).key(key)
            })
            .collect();
        let legend: Vec<View> = PORTFOLIO_RATIO
            .iter()
            .zip(self.ratio_texts())
            .map(|(slice, text)| {
                Row()
                    .reveal(r, &legend_key(slice.label), now)
                    .child((Counter(text).key(count_key(slice.label)), Body(slice.label)))
            })
            .collect();
        let target = CountFormat::plain().format(self.target.value());

        Section(ANCHOR).child((
            Column().reveal(r, "perf-metrics-card", now).child((
                Marker().reveal(r, "perf-orb", now),
                Heading("Performance Metrics").reveal(r, "perf-heading", now),
                Column().reveal(r, "perf-metrics", now).child(rows),
            )),
            Column().reveal(r, "perf-nextgen-card", now).child((
                Row().child((
                    Column().child((Title("Next-Gen Projects"), Body("Maintaining Portfolio Ratio"))),
                    Marker().reveal(r, "perf-badge", now),
                )),
                Row().reveal(r, "perf-bars", now).child(bars),
                Column().reveal(r, "perf-legend", now).child(legend),
                Column().reveal(r, "perf-footnote", now).child((
                    Counter(format!("Target: {target}M by 2025")).key("perf-count-target"),
                    Body("Launching Bridge Financing as part of ALI\u{2019}s niche portfolio."),
                )),
            )),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
