use amalgated_core::{
    CountUpAnimator, CountUpOptions, Motion, RevealChoreographer, RevealNode, VisibilityOptions,
    VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, slug, tween_node};
use crate::content::{ASSET_ITEMS, ASSET_MANAGEMENT_IMAGE, AssetStat};
use crate::view::*;

const ANCHOR: &str = "asset-management";
const COUNT_MS: i64 = 1800;

pub struct AssetManagementSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    stats: Vec<(&'static AssetStat, CountUpAnimator)>,
    image: Option<String>,
}

fn row_key(stat: &AssetStat) -> String {
    format!("assets-{}", slug(stat.label))
}

impl AssetManagementSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.08).once());
        let rows = ASSET_ITEMS
            .iter()
            .map(|stat| tween_node(&row_key(stat), Motion::fade_up(8.0), 400, 0));
        let root = RevealNode::new("assets").children([
            tween_node("assets-heading", Motion::fade_up(10.0), 500, 50),
            RevealNode::group("assets-rows", 40, 100).children(rows),
            tween_node("assets-map", Motion::fade_up(6.0), 400, 400),
            tween_node("assets-image", Motion::slide_x(12.0), 500, 150),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        let stats = ASSET_ITEMS
            .iter()
            .map(|stat| {
                let options = CountUpOptions::duration_ms(COUNT_MS).decimals(stat.decimals.unwrap_or(0));
                (stat, ctx.count_up(stat.end, &tracker, options))
            })
            .collect();
        Self {
            tracker,
            reveal,
            stats,
            image: ctx.asset(Some(ASSET_MANAGEMENT_IMAGE)),
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }

    pub fn counter_texts(&self) -> Vec<String> {
        self.stats
            .iter()
            .map(|(stat, counter)| stat.format().format(counter.value()))
            .collect()
    }
}

impl PageSection for AssetManagementSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let rows: Vec<View> = self
            .stats
            .iter()
            .map(|(stat, counter)| {
                Row().reveal(r, &row_key(stat), now).child((
                    Counter(stat.format().format(counter.value()))
                        .key(format!("{}-count", row_key(stat))),
                    Body(stat.label),
                ))
            })
            .collect();
        Section(ANCHOR).child((
            Column().child((
                Row().child((Label("Nationwide"), Label("Asset Management"))),
                Heading("Unrivaled Reach Across the Philippines").reveal(r, "assets-heading", now),
                Column().reveal(r, "assets-rows", now).child(rows),
                Link("View Property Map", "#asset-management").reveal(r, "assets-map", now),
            )),
            Column().reveal(r, "assets-image", now).child((
                self.image.as_deref().map(|src| {
                    Image(
                        src,
                        "Commercial real estate and nationwide asset portfolio \u{2013} Amalgated Holdings",
                    )
                }),
                Label("Latest Acquisition"),
                Row().child((Title("Taguig Corporate Center"), Label("Active"))),
            )),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
