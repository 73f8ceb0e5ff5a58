use amalgated_core::{
    Motion, RevealChoreographer, RevealNode, Stagger, VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug, tween_node};
use crate::content::{CORE_VALUES, PHILOSOPHY_CARDS};
use crate::view::*;

const ANCHOR: &str = "vision-mission";

/// Philosophy cards, then the seven core values nested under their block so
/// they start after it.
pub struct VisionMissionSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
}

fn philosophy_key(title: &str) -> String {
    format!("vision-philosophy-{}", slug(title))
}

fn value_key(title: &str) -> String {
    format!("vision-value-{}", slug(title))
}

impl VisionMissionSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.08).once());
        let philosophy = PHILOSOPHY_CARDS
            .iter()
            .map(|t| ease_node(&philosophy_key(t), Motion::fade_up(20.0), 500, 0));
        let values = CORE_VALUES
            .iter()
            .map(|c| ease_node(&value_key(c.title), Motion::fade_up(20.0), 500, 0));
        let root = RevealNode::new("vision").children([
            tween_node("vision-label", Motion::fade_up(6.0), 400, 0),
            tween_node("vision-heading", Motion::fade_up(10.0), 500, 50),
            tween_node("vision-intro", Motion::fade_up(8.0), 500, 100),
            RevealNode::group("vision-philosophy", 60, 120).children(philosophy),
            tween_node("vision-core", Motion::fade_up(12.0), 500, 250)
                .stagger(Stagger::ms(50, 30))
                .children(values),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        Self { tracker, reveal }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }
}

impl PageSection for VisionMissionSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let philosophy: Vec<View> = PHILOSOPHY_CARDS
            .iter()
            .map(|t| Title(*t).reveal(r, &philosophy_key(t), now))
            .collect();
        let values: Vec<View> = CORE_VALUES
            .iter()
            .map(|c| {
                Column()
                    .reveal(r, &value_key(c.title), now)
                    .child((Title(c.title), Body(c.description)))
            })
            .collect();
        Section(ANCHOR).child((
            Label("Our Philosophy").reveal(r, "vision-label", now),
            Heading("Vision & Mission: Our Philosophy").reveal(r, "vision-heading", now),
            Body(
                "Our leadership brand is defined by our unwavering commitment to our core philosophy. We care for the lives of our Partners, Employees, Tenants & Suppliers, and all stakeholders by providing services and facilities that exceed expectations. We are caring Amalgated Leaders.",
            )
            .reveal(r, "vision-intro", now),
            Grid(4).reveal(r, "vision-philosophy", now).child(philosophy),
            Column().reveal(r, "vision-core", now).child((
                Label("The Amalgated Way"),
                Heading("Core Values"),
                Grid(3).child(values),
            )),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
