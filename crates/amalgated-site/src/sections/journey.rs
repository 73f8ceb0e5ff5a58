use amalgated_core::{
    Motion, Pose, RevealChoreographer, RevealNode, VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, spring_node, tween_node};
use crate::content::{MILESTONES, Milestone};
use crate::view::*;

const ANCHOR: &str = "journey";

pub(crate) const HEADER_HEIGHT: f32 = 300.0;
pub(crate) const ITEM_PITCH: f32 = 360.0;
const ITEM_HEIGHT: f32 = 300.0;

/// "Our Journey" timeline. The header and track follow the section tracker;
/// every milestone has its own tracker, so items animate in and out as they
/// individually cross a quarter of their height.
pub struct JourneySection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    items: Vec<TimelineItem>,
}

impl JourneySection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.15));
        let root = RevealNode::new("journey").children([
            RevealNode::group("journey-header", 80, 100).children([
                ease_node("journey-label", Motion::fade_up(16.0), 500, 0),
                ease_node("journey-heading", Motion::fade_up(16.0), 500, 0),
            ]),
            ease_node("journey-track", Motion::grow_y(), 1200, 200),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        let items = MILESTONES
            .iter()
            .enumerate()
            .map(|(i, m)| TimelineItem::mount(ctx, m, i))
            .collect();
        Self {
            tracker,
            reveal,
            items,
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }
}

impl PageSection for JourneySection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        Section(ANCHOR).child((
            Column().reveal(r, "journey-header", now).child((
                Label("Our Journey").reveal(r, "journey-label", now),
                Heading("Historic Milestones").reveal(r, "journey-heading", now),
            )),
            Marker().reveal(r, "journey-track", now),
            Column().child(
                self.items
                    .iter()
                    .map(|item| item.render(now))
                    .collect::<Vec<_>>(),
            ),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}

/// One milestone card with its dot, year pill and content.
pub struct TimelineItem {
    milestone: &'static Milestone,
    key: String,
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
}

impl TimelineItem {
    fn mount(ctx: &SectionCtx, milestone: &'static Milestone, index: usize) -> Self {
        let key = format!("milestone-{}", milestone.year);
        let offset = HEADER_HEIGHT + index as f32 * ITEM_PITCH;
        let tracker = ctx.track(&key, offset, ITEM_HEIGHT, VisibilityOptions::amount(0.25));

        // cards alternate sides
        let from_x = if index % 2 == 0 { -24.0 } else { 24.0 };
        let s = 120 + index as u64 * 60;
        let k = |part: &str| format!("{key}-{part}");

        let mut parts = vec![
            spring_node(&k("halo"), Motion::zoom_in(0.0), 200.0, 18.0, s),
            spring_node(&k("ring"), Motion::pop(), 320.0, 22.0, s + 60),
            spring_node(&k("dot"), Motion::pop(), 400.0, 20.0, s + 120),
            ease_node(&k("year"), Motion::fade_up(8.0), 400, s + 80),
            ease_node(
                &k("card"),
                Motion::new(Pose::REST.opacity(0.0).offset(from_x, 16.0), Pose::REST),
                500,
                s + 100,
            ),
            tween_node(&k("title"), Motion::fade_in(), 400, s + 200),
            tween_node(&k("description"), Motion::fade_in(), 400, s + 250),
            tween_node(&k("image"), Motion::zoom_in(0.98), 450, s + 220),
        ];
        if milestone.badge.is_some() {
            parts.push(tween_node(&k("badge"), Motion::fade_in(), 400, s + 300));
        }
        let reveal = ctx.reveal(RevealNode::new(key.clone()).children(parts), &tracker);
        Self {
            milestone,
            key,
            tracker,
            reveal,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_visible(&self) -> bool {
        self.tracker.is_visible()
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let m = self.milestone;
        let k = |part: &str| format!("{}-{part}", self.key);
        Row().key(self.key.clone()).child((
            Marker().reveal(r, &k("halo"), now).child((
                Marker().reveal(r, &k("ring"), now),
                Marker().reveal(r, &k("dot"), now),
            )),
            Label(m.year).reveal(r, &k("year"), now),
            Column().reveal(r, &k("card"), now).child((
                Title(m.title).reveal(r, &k("title"), now),
                Body(m.description).reveal(r, &k("description"), now),
                m.badge.map(|b| {
                    Column()
                        .reveal(r, &k("badge"), now)
                        .child((Label(b.label), Body(b.detail)))
                }),
                Image(m.image, m.image_alt).reveal(r, &k("image"), now),
            )),
        ))
    }
}
