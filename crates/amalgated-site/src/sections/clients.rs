use amalgated_core::{
    Motion, RevealChoreographer, RevealNode, VisibilityOptions, VisibilityTracker, signal,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug, tween_node};
use crate::content::{CLIENT_CATEGORIES, ClientCategory, MAJOR_CLIENTS};
use crate::view::*;

const ANCHOR: &str = "our-clients";

/// Client categories and the "trusted by" logo strip.
///
/// The strip only lists clients whose logo resolves, and it animates as soon
/// as the section mounts rather than waiting for the section tracker.
pub struct ClientsSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    logo_reveal: RevealChoreographer,
    /// `(name, url)` for every client with a resolvable logo, in listing order.
    logos: Vec<(&'static str, String)>,
}

fn category_key(category: &ClientCategory) -> String {
    format!("clients-{}", slug(category.title))
}

fn logo_key(name: &str) -> String {
    format!("clients-logo-{}", slug(name))
}

impl ClientsSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.08).once());
        let categories = CLIENT_CATEGORIES
            .iter()
            .map(|c| ease_node(&category_key(c), Motion::fade_up(20.0), 500, 0));
        let root = RevealNode::new("clients").children([
            tween_node("clients-label", Motion::fade_up(6.0), 400, 0),
            tween_node("clients-heading", Motion::fade_up(8.0), 500, 50),
            tween_node("clients-lead", Motion::fade_up(8.0), 500, 100),
            RevealNode::group("clients-categories", 80, 150).children(categories),
            tween_node("clients-trusted", Motion::fade_in(), 500, 350),
        ]);
        let reveal = ctx.reveal(root, &tracker);

        let logos: Vec<(&'static str, String)> = MAJOR_CLIENTS
            .iter()
            .filter_map(|c| Some((c.name, ctx.asset(c.logo)?)))
            .collect();
        log::debug!(
            "{} of {} client logos resolved",
            logos.len(),
            MAJOR_CLIENTS.len()
        );
        let logo_nodes = logos
            .iter()
            .map(|(name, _)| tween_node(&logo_key(name), Motion::fade_up(10.0), 400, 0));
        let logo_reveal = RevealChoreographer::new(
            RevealNode::group("clients-logos", 30, 150).children(logo_nodes),
            &signal(true),
            ctx.scheduler.clone(),
        );

        Self {
            tracker,
            reveal,
            logo_reveal,
            logos,
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }

    pub fn logo_reveal(&self) -> &RevealChoreographer {
        &self.logo_reveal
    }

    /// Names of the clients shown in the logo strip.
    pub fn logo_names(&self) -> Vec<&'static str> {
        self.logos.iter().map(|(name, _)| *name).collect()
    }
}

impl PageSection for ClientsSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let categories: Vec<View> = CLIENT_CATEGORIES
            .iter()
            .map(|c| {
                Column().reveal(r, &category_key(c), now).child((
                    Image(c.image, c.title),
                    Title(c.title),
                    Body(c.description),
                ))
            })
            .collect();
        let logos: Vec<View> = self
            .logos
            .iter()
            .map(|(name, url)| Image(url.as_str(), *name).reveal(&self.logo_reveal, &logo_key(name), now))
            .collect();
        Section(ANCHOR).child((
            Label("Our Clients").reveal(r, "clients-label", now),
            Heading("Who We Serve").reveal(r, "clients-heading", now),
            Body(
                "We serve both public and private sectors across office spaces, commercial lots, and residential units.",
            )
            .reveal(r, "clients-lead", now),
            Grid(3).reveal(r, "clients-categories", now).child(categories),
            Body("Trusted by Industry Leaders & Global Brands").reveal(r, "clients-trusted", now),
            Row().reveal(&self.logo_reveal, "clients-logos", now).child(logos),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
