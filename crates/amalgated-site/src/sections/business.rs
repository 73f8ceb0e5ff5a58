use amalgated_core::{
    Motion, RevealChoreographer, RevealNode, VisibilityOptions, VisibilityTracker,
};
use web_time::Instant;

use super::{PageSection, SectionCtx, ease_node, slug, tween_node};
use crate::content::{
    Company, REAL_ESTATE_COMPANIES, REAL_ESTATE_IMAGES, REAL_ESTATE_SERVICES, RETAIL_BRANDS,
    RETAIL_HERO_IMAGE, RETAIL_SERVICES,
};
use crate::view::*;

const ANCHOR: &str = "business-models";

/// Two business blocks, real estate then retail, each with its own service
/// list and the companies or brands behind it.
pub struct BusinessModelsSection {
    tracker: VisibilityTracker,
    reveal: RevealChoreographer,
    retail_image: Option<String>,
    companies: Vec<(&'static Company, Option<String>)>,
    brands: Vec<(&'static Company, Option<String>)>,
}

fn keyed(prefix: &str, text: &str) -> String {
    format!("{prefix}-{}", slug(text))
}

impl BusinessModelsSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        let tracker = ctx.track_section(ANCHOR, VisibilityOptions::amount(0.1).once());

        let re_services = REAL_ESTATE_SERVICES
            .iter()
            .map(|s| tween_node(&keyed("re-service", s), Motion::slide_x(-10.0), 350, 0));
        let re_companies = REAL_ESTATE_COMPANIES
            .iter()
            .map(|c| tween_node(&keyed("re-company", c.name), Motion::fade_in(), 300, 0));
        let retail_services = RETAIL_SERVICES
            .iter()
            .map(|s| tween_node(&keyed("retail-service", s), Motion::slide_x(10.0), 350, 0));
        let brands = RETAIL_BRANDS
            .iter()
            .map(|c| tween_node(&keyed("retail-brand", c.name), Motion::fade_in(), 300, 0));

        let real_estate = ease_node("re-block", Motion::fade_up(24.0), 600, 150).children([
            tween_node("re-heading", Motion::slide_x(-8.0), 400, 100),
            RevealNode::group("re-services", 40, 150).children(re_services),
            tween_node("re-companies", Motion::fade_in(), 400, 400)
                .child(RevealNode::group("re-company-list", 50, 50).children(re_companies)),
            tween_node("re-image-main", Motion::zoom_in(0.98), 600, 50),
            tween_node("re-image-2", Motion::fade_in(), 500, 200),
            tween_node("re-image-3", Motion::fade_in(), 500, 250),
        ]);
        let retail = ease_node("retail-block", Motion::fade_up(24.0), 600, 250).children([
            tween_node("retail-image", Motion::zoom_in(0.98), 600, 30),
            tween_node("retail-heading", Motion::slide_x(8.0), 400, 50),
            RevealNode::group("retail-services", 40, 100).children(retail_services),
            tween_node("retail-brands", Motion::fade_in(), 400, 350)
                .child(RevealNode::group("retail-brand-list", 50, 50).children(brands)),
        ]);
        let root = RevealNode::new("business").children([
            RevealNode::group("business-header", 80, 100).children([
                ease_node("business-label", Motion::fade_up(12.0), 500, 0),
                ease_node("business-heading", Motion::fade_up(14.0), 500, 50),
            ]),
            real_estate,
            retail,
        ]);
        let reveal = ctx.reveal(root, &tracker);

        let with_logo = |c: &'static Company| (c, ctx.asset(Some(c.image)));
        Self {
            tracker,
            reveal,
            retail_image: ctx.asset(Some(RETAIL_HERO_IMAGE)),
            companies: REAL_ESTATE_COMPANIES.iter().map(with_logo).collect(),
            brands: RETAIL_BRANDS.iter().map(with_logo).collect(),
        }
    }

    pub fn reveal(&self) -> &RevealChoreographer {
        &self.reveal
    }
}

fn company_view(
    r: &RevealChoreographer,
    prefix: &str,
    company: &Company,
    logo: Option<&str>,
    now: Instant,
) -> View {
    Row()
        .reveal(r, &keyed(prefix, company.name), now)
        .child((logo.map(|src| Image(src, company.name)), Body(company.name)))
}

impl PageSection for BusinessModelsSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, now: Instant) -> View {
        let r = &self.reveal;
        let re_services: Vec<View> = REAL_ESTATE_SERVICES
            .iter()
            .map(|s| Body(*s).reveal(r, &keyed("re-service", s), now))
            .collect();
        let companies: Vec<View> = self
            .companies
            .iter()
            .map(|(c, logo)| company_view(r, "re-company", c, logo.as_deref(), now))
            .collect();
        let image_keys = ["re-image-main", "re-image-2", "re-image-3"];
        let images: Vec<View> = REAL_ESTATE_IMAGES
            .iter()
            .zip(image_keys)
            .map(|(&(src, alt), key)| Image(src, alt).reveal(r, key, now))
            .collect();
        let retail_services: Vec<View> = RETAIL_SERVICES
            .iter()
            .map(|s| Body(*s).reveal(r, &keyed("retail-service", s), now))
            .collect();
        let brands: Vec<View> = self
            .brands
            .iter()
            .map(|(c, logo)| company_view(r, "retail-brand", c, logo.as_deref(), now))
            .collect();

        Section(ANCHOR).child((
            Column().reveal(r, "business-header", now).child((
                Label("What We Do").reveal(r, "business-label", now),
                Heading("Our Business Models").reveal(r, "business-heading", now),
            )),
            Row().reveal(r, "re-block", now).child((
                Column().child((
                    Title("Real Estate & Leasing").reveal(r, "re-heading", now),
                    Column().reveal(r, "re-services", now).child(re_services),
                    Column().reveal(r, "re-companies", now).child((
                        Label("Our Companies"),
                        Row().reveal(r, "re-company-list", now).child(companies),
                    )),
                )),
                Grid(2).child(images),
            )),
            Row().reveal(r, "retail-block", now).child((
                self.retail_image
                    .as_deref()
                    .map(|src| Image(src, "Retail and distribution").reveal(r, "retail-image", now)),
                Column().child((
                    Title("Retail & Distribution").reveal(r, "retail-heading", now),
                    Column().reveal(r, "retail-services", now).child(retail_services),
                    Column().reveal(r, "retail-brands", now).child((
                        Label("Our Brands"),
                        Row().reveal(r, "retail-brand-list", now).child(brands),
                    )),
                )),
            )),
        ))
    }

    fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }
}
