use web_time::Instant;

use super::{PageSection, SectionCtx};
use crate::content::{COMPANY, CTA_IMAGE};
use crate::view::*;

const ANCHOR: &str = "contact";

/// Static partnership call to action. Nothing here animates.
pub struct CallToActionSection {
    image: Option<String>,
}

impl CallToActionSection {
    pub fn mount(ctx: &SectionCtx) -> Self {
        Self {
            image: ctx.asset(Some(CTA_IMAGE)),
        }
    }
}

impl PageSection for CallToActionSection {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, _now: Instant) -> View {
        Section(ANCHOR).child((
            self.image
                .as_deref()
                .map(|src| Image(src, "Modern business environment")),
            Column().child((
                Heading(format!("Partner With {COMPANY}")),
                Body(
                    "Be part of a growing nationwide enterprise focused on Real Estate, Retail & Distribution, Financial Services, LPG Operations, and IT & Technology.",
                ),
                Link("Contact us today", "#contact"),
            )),
        ))
    }
}
