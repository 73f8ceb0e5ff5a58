use amalgated_core::{
    Motion, RevealChoreographer, RevealNode, VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node};
use crate::content::{COMPANY, HERO_VIDEO};
use crate::view::*;

const ANCHOR: &str = "top";

/// Full-height intro. Replays its entrance every time it comes back into view.
pub struct HeroSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    video: Option<String>,
}

impl HeroSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.2));
        let root = RevealNode::group("hero", 100, 150).children([
            ease_node("hero-title", Motion::fade_up(24.0), 600, 0),
            ease_node("hero-tagline", Motion::fade_up(20.0), 500, 0),
            ease_node("hero-lead", Motion::fade_up(20.0), 500, 0),
            ease_node("hero-actions", Motion::fade_up(20.0), 500, 0),
        ]);
        let reveal = ctx.reveal(root, &tracker);
        Self {
            tracker,
            reveal,
            video: ctx.asset(Some(HERO_VIDEO)),
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }
}

impl PageSection for HeroSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        Section(ANCHOR).child((
            self.video.as_deref().map(Video),
            Column().reveal(r, "hero", now).child((
                Heading(COMPANY).reveal(r, "hero-title", now),
                Title(
                    "Premier Retailer & Service Provider of Lending, LPG & Leasing in the Philippines.",
                )
                .reveal(r, "hero-tagline", now),
                Body(
                    "Delivering excellence in Real Estate, Retail & Distribution, and Financial Services, built on heritage, driven by growth.",
                )
                .reveal(r, "hero-lead", now),
                Row().reveal(r, "hero-actions", now).child((
                    Link("Explore Our Businesses", "#business-models"),
                    Link("Partner With Us", "#contact"),
                )),
            )),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
