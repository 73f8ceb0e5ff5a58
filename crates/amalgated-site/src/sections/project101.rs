use amalgated_core::{
    CountUpAnimator, CountUpOptions, Motion, RevealChoreographer, RevealNode, VisibilityOptions,
    VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug, tween_node};
use crate::content::{PROJECT_101_CARDS, RoadmapCard};
use crate::view::*;

const ANCHOR: &str = "project-101";
const COUNT_MS: i64 = 1600;

/// "Project 101" growth roadmap: three target cards with counters.
pub struct Project101Section {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    counters: Vec<(&'static RoadmapCard, CountUpAnimator)>,
}

fn card_key(card: &RoadmapCard) -> String {
    format!("project101-{}", slug(card.category))
}

impl Project101Section {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.08).once());
        let cards = PROJECT_101_CARDS
            .iter()
            .map(|card| ease_node(&card_key(card), Motion::fade_up(20.0), 500, 0));
        let root = RevealNode::new("project101").children([
            tween_node("project101-label", Motion::fade_up(6.0), 400, 0),
            tween_node("project101-heading", Motion::fade_up(10.0), 500, 50),
            tween_node("project101-lead", Motion::fade_up(8.0), 500, 100),
            tween_node("project101-report", Motion::fade_up(6.0), 400, 120),
            tween_node("project101-divider", Motion::fade_in(), 500, 150),
            RevealNode::group("project101-cards", 80, 200).children(cards),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        let counters = PROJECT_101_CARDS
            .iter()
            .map(|card| {
                let counter = ctx.count_up(
                    card.count_end,
                    &tracker,
                    CountUpOptions::duration_ms(COUNT_MS),
                );
                (card, counter)
            })
            .collect();
        Self {
            tracker,
            reveal,
            counters,
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }

    /// Each card's current formatted counter text, in card order.
    pub fn counter_texts(&self) -> Vec<String> {
        self.counters
            .iter()
            .map(|(card, counter)| card.format().format(counter.value()))
            .collect()
    }
}

impl PageSection for Project101Section {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let cards: Vec<View> = self
            .counters
            .iter()
            .map(|(card, counter)| {
                Column().reveal(r, &card_key(card), now).child((
                    Label(card.category),
                    Row().child((
                        Counter(card.format().format(counter.value()))
                            .key(format!("{}-count", card_key(card))),
                        card.value_suffix.map(Title),
                    )),
                    Title(card.unit),
                    Body(card.description),
                ))
            })
            .collect();
        Section(ANCHOR).child((
            Label("Strategic Roadmap").reveal(r, "project101-label", now),
            Heading("Project 101 \u{2013} Our Growth Target").reveal(r, "project101-heading", now),
            Body(
                "Our bold strategic vision for the next decade. We are committed to scaling our impact through tangible milestones.",
            )
            .reveal(r, "project101-lead", now),
            Link("View Strategic Report", "#project-101").reveal(r, "project101-report", now),
            Marker().reveal(r, "project101-divider", now),
            Grid(3).reveal(r, "project101-cards", now).child(cards),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
