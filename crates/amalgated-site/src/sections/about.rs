use amalgated_core::{
    Motion, RevealChoreographer, RevealNode, VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug};
use crate::content::{ABOUT_IMAGE, ABOUT_SECTORS, COMPANY};
use crate::view::*;

const ANCHOR: &str = "about-us";

pub struct AboutSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    image: Option<String>,
}

impl AboutSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.12).once());
        let sectors = ABOUT_SECTORS
            .iter()
            .map(|s| ease_node(&format!("about-sector-{}", slug(s)), Motion::slide_x(-12.0), 400, 0));
        let root = RevealNode::new("about").children([
            ease_node("about-accent", Motion::grow_y(), 700, 150),
            ease_node("about-label", Motion::fade_up(12.0), 500, 0),
            ease_node("about-heading", Motion::fade_up(14.0), 500, 60),
            ease_node("about-intro", Motion::fade_up(10.0), 450, 100),
            RevealNode::group("about-sectors", 50, 150).children(sectors),
            ease_node("about-closing", Motion::fade_up(10.0), 500, 400),
            ease_node("about-image", Motion::slide_x(24.0), 600, 200),
            ease_node("about-badge", Motion::fade_up(16.0), 500, 450),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        Self {
            tracker,
            reveal,
            image: ctx.asset(Some(ABOUT_IMAGE)),
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }
}

impl PageSection for AboutSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let sectors: Vec<View> = ABOUT_SECTORS
            .iter()
            .map(|s| Body(*s).reveal(r, &format!("about-sector-{}", slug(s)), now))
            .collect();
        Section(ANCHOR).child((
            Column().child((
                Marker().reveal(r, "about-accent", now),
                Label("About Us").reveal(r, "about-label", now),
                Heading(COMPANY).reveal(r, "about-heading", now),
                Body("A diversified holding company engaged in:").reveal(r, "about-intro", now),
                Column().reveal(r, "about-sectors", now).child(sectors),
                Body(
                    "From a humble beginning in Davao City, the Group has grown into a nationwide organization managing commercial properties, residential developments, lending centers, retail outlets, and LPG dealerships.",
                )
                .reveal(r, "about-closing", now),
            )),
            Column().reveal(r, "about-image", now).child((
                self.image
                    .as_deref()
                    .map(|src| Image(src, "The Amalgated Group, diversified holding company")),
                Column().reveal(r, "about-badge", now).child((
                    Title("Nationwide presence"),
                    Body("From Davao to the Philippines"),
                )),
            )),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
