use web_time::Instant;

use super::{PageSection, SectionCtx};
use crate::content::{FOOTER_NAV, HOLDINGS, LOGO};
use crate::view::*;

const ANCHOR: &str = "footer";

pub struct Footer {
    logo: Option<String>,
    copyright_year: Option<i32>,
}

impl Footer {
    pub fn mount(ctx: &SectionCtx) -> Self {
        Self {
            logo: ctx.asset(Some(LOGO)),
            copyright_year: ctx.copyright_year,
        }
    }

    /// `© {year} Amalgated Holdings. All rights reserved.`, when a year is
    /// configured.
    pub fn copyright(&self) -> Option<String> {
        self.copyright_year
            .map(|year| format!("\u{a9} {year} {HOLDINGS}. All rights reserved."))
    }
}

impl PageSection for Footer {
    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn render(&self, _now: Instant) -> View {
        let nav: Vec<View> = FOOTER_NAV
            .iter()
            .map(|group| {
                let links: Vec<View> = group
                    .links
                    .iter()
                    .map(|&(label, href)| Link(label, href))
                    .collect();
                Column().child((Label(group.title), Column().child(links)))
            })
            .collect();
        Section(ANCHOR).child((
            Row().child((
                Link(HOLDINGS, "#top").child(
                    self.logo
                        .as_deref()
                        .map(|src| Image(src, "Amalgated Holdings Logo")),
                ),
                Link("Contact us", "#contact"),
            )),
            Grid(3).child(nav),
            self.copyright().map(Body),
        ))
    }
}
