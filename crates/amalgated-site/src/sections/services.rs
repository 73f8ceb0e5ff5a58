use amalgated_core::{
    Motion, RevealChoreographer, RevealNode, VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug, tween_node};
use crate::content::{SERVICE_CATEGORIES, ServiceCategory};
use crate::view::*;

const ANCHOR: &str = "services";

pub struct ServicesSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
}

fn card_key(category: &ServiceCategory) -> String {
    format!("services-{}", slug(category.title))
}

impl ServicesSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.08).once());
        let cards = SERVICE_CATEGORIES.iter().map(|category| {
            let key = card_key(category);
            let items = category.items.iter().map(|item| {
                tween_node(&format!("{key}-{}", slug(item)), Motion::slide_x(-6.0), 350, 0)
            });
            ease_node(&key, Motion::fade_up(20.0), 500, 0).children([
                ease_node(&format!("{key}-accent"), Motion::grow_y(), 500, 100),
                RevealNode::group(format!("{key}-items"), 30, 150).children(items),
            ])
        });
        let root = RevealNode::new("services").children([
            RevealNode::group("services-header", 60, 0).children([
                ease_node("services-label", Motion::fade_up(10.0), 500, 0),
                ease_node("services-heading", Motion::fade_up(12.0), 500, 40),
            ]),
            RevealNode::group("services-categories", 80, 100).children(cards),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        Self { tracker, reveal }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }
}

impl PageSection for ServicesSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let cards: Vec<View> = SERVICE_CATEGORIES
            .iter()
            .map(|category| {
                let key = card_key(category);
                let items: Vec<View> = category
                    .items
                    .iter()
                    .map(|item| Body(*item).reveal(r, &format!("{key}-{}", slug(item)), now))
                    .collect();
                Column().reveal(r, &key, now).child((
                    Marker().reveal(r, &format!("{key}-accent"), now),
                    Title(category.title),
                    Column().reveal(r, &format!("{key}-items"), now).child(items),
                ))
            })
            .collect();
        Section(ANCHOR).child((
            Column().reveal(r, "services-header", now).child((
                Label("Services").reveal(r, "services-label", now),
                Heading("What We Offer").reveal(r, "services-heading", now),
            )),
            Grid(3).reveal(r, "services-categories", now).child(cards),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
