//! The page's sections, top to bottom.
//!
//! Each section mounts against a [`SectionCtx`]: it claims its elements from
//! the [`ElementHost`], builds its trackers and animators, and then renders a
//! [`View`] for any instant. Everything it creates is registered with the
//! scope the page mounts it in, so unmounting the page tears it all down.

use std::rc::Rc;

use amalgated_core::{
    AnimationSpec, CountUpAnimator, CountUpOptions, Easing, ElementId, FrameScheduler, Motion,
    Rect, RevealChoreographer, RevealNode, ViewportObserver, VisibilityOptions,
    VisibilityTracker,
};
use web_time::Instant;

use crate::assets::AssetRegistry;
use crate::view::View;

mod about;
mod asset_management;
mod business;
mod clients;
mod cta;
mod footer;
mod hero;
mod journey;
mod performance;
mod project101;
mod services;
mod vision;

pub use about::AboutSection;
pub use asset_management::AssetManagementSection;
pub use business::BusinessModelsSection;
pub use clients::ClientsSection;
pub use cta::CallToActionSection;
pub use footer::Footer;
pub use hero::HeroSection;
pub use journey::{JourneySection, TimelineItem};
pub use performance::PerformanceSection;
pub use project101::Project101Section;
pub use services::ServicesSection;
pub use vision::VisionMissionSection;

/// Places named elements for visibility tracking.
///
/// The headless page lays elements out itself; a browser host looks the
/// element up in the document and ignores `rect`.
pub trait ElementHost {
    fn element(&self, name: &str, rect: Rect) -> ElementId;
}

/// A mounted section.
pub trait PageSection {
    fn anchor(&self) -> &'static str;

    fn render(&self, now: Instant) -> View;

    /// Whether the section's own tracker currently reports it on screen.
    /// Static sections are always "in view".
    fn in_view(&self) -> bool {
        true
    }
}

/// What a section gets to mount with.
#[derive(Clone)]
pub struct SectionCtx {
    pub host: Rc<dyn ElementHost>,
    pub observer: Rc<dyn ViewportObserver>,
    pub scheduler: Rc<dyn FrameScheduler>,
    pub assets: Rc<AssetRegistry>,
    /// The section's box in page coordinates.
    pub rect: Rect,
    pub copyright_year: Option<i32>,
}

impl SectionCtx {
    /// Element `name` spanning the section's width, `offset_y` below its top.
    pub fn element_at(&self, name: &str, offset_y: f32, height: f32) -> ElementId {
        let rect = Rect::new(self.rect.x, self.rect.y + offset_y, self.rect.w, height);
        self.host.element(name, rect)
    }

    /// Tracker over the whole section box.
    pub fn track_section(&self, anchor: &str, options: VisibilityOptions) -> VisibilityTracker {
        let element = self.element_at(anchor, 0.0, self.rect.h);
        VisibilityTracker::observe(&self.observer, element, options)
    }

    pub fn track(
        &self,
        name: &str,
        offset_y: f32,
        height: f32,
        options: VisibilityOptions,
    ) -> VisibilityTracker {
        let element = self.element_at(name, offset_y, height);
        VisibilityTracker::observe(&self.observer, element, options)
    }

    pub fn reveal(&self, root: RevealNode, tracker: &VisibilityTracker) -> RevealChoreographer {
        RevealChoreographer::new(root, &tracker.signal(), self.scheduler.clone())
    }

    pub fn count_up(
        &self,
        target: f64,
        tracker: &VisibilityTracker,
        options: CountUpOptions,
    ) -> CountUpAnimator {
        CountUpAnimator::new(target, &tracker.signal(), self.scheduler.clone(), options)
    }

    pub fn asset(&self, key: Option<&str>) -> Option<String> {
        self.assets.resolve(key).map(str::to_owned)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Journey,
    About,
    VisionMission,
    BusinessModels,
    Services,
    Project101,
    AssetManagement,
    Clients,
    Performance,
    CallToAction,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Hero,
        SectionKind::Journey,
        SectionKind::About,
        SectionKind::VisionMission,
        SectionKind::BusinessModels,
        SectionKind::Services,
        SectionKind::Project101,
        SectionKind::AssetManagement,
        SectionKind::Clients,
        SectionKind::Performance,
        SectionKind::CallToAction,
        SectionKind::Footer,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionKind::Hero => "top",
            SectionKind::Journey => "journey",
            SectionKind::About => "about-us",
            SectionKind::VisionMission => "vision-mission",
            SectionKind::BusinessModels => "business-models",
            SectionKind::Services => "services",
            SectionKind::Project101 => "project-101",
            SectionKind::AssetManagement => "asset-management",
            SectionKind::Clients => "our-clients",
            SectionKind::Performance => "performance-metrics",
            SectionKind::CallToAction => "contact",
            SectionKind::Footer => "footer",
        }
    }

    /// Laid-out height in px. The hero fills the viewport.
    pub fn height(self, viewport_height: f32) -> f32 {
        match self {
            SectionKind::Hero => viewport_height.max(1.0),
            SectionKind::Journey => journey::HEADER_HEIGHT + journey::ITEM_PITCH * 6.0 + 100.0,
            SectionKind::About => 900.0,
            SectionKind::VisionMission => 1400.0,
            SectionKind::BusinessModels => 1600.0,
            SectionKind::Services => 800.0,
            SectionKind::Project101 => 900.0,
            SectionKind::AssetManagement => 900.0,
            SectionKind::Clients => 1100.0,
            SectionKind::Performance => 800.0,
            SectionKind::CallToAction => 500.0,
            SectionKind::Footer => 400.0,
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<SectionKind> {
        let anchor = anchor.trim_start_matches('#');
        Self::ALL.into_iter().find(|k| k.anchor() == anchor)
    }

    pub fn mount(self, ctx: &SectionCtx) -> Box<dyn PageSection> {
        let section: Box<dyn PageSection> = match self {
            SectionKind::Hero => Box::new(HeroSection::mount(ctx)),
            SectionKind::Journey => Box::new(JourneySection::mount(ctx)),
            SectionKind::About => Box::new(AboutSection::mount(ctx)),
            SectionKind::VisionMission => Box::new(VisionMissionSection::mount(ctx)),
            SectionKind::BusinessModels => Box::new(BusinessModelsSection::mount(ctx)),
            SectionKind::Services => Box::new(ServicesSection::mount(ctx)),
            SectionKind::Project101 => Box::new(Project101Section::mount(ctx)),
            SectionKind::AssetManagement => Box::new(AssetManagementSection::mount(ctx)),
            SectionKind::Clients => Box::new(ClientsSection::mount(ctx)),
            SectionKind::Performance => Box::new(PerformanceSection::mount(ctx)),
            SectionKind::CallToAction => Box::new(CallToActionSection::mount(ctx)),
            SectionKind::Footer => Box::new(Footer::mount(ctx)),
        };
        log::info!("mounted section #{}", self.anchor());
        section
    }
}

/// Leaf on the page's signature out-curve.
pub(crate) fn ease_node(key: &str, motion: Motion, duration_ms: u64, delay_ms: u64) -> RevealNode {
    RevealNode::new(key)
        .motion(motion)
        .transition(AnimationSpec::out_ms(duration_ms))
        .delay_ms(delay_ms)
}

/// Leaf with the default ease-out, for elements without a custom curve.
pub(crate) fn tween_node(key: &str, motion: Motion, duration_ms: u64, delay_ms: u64) -> RevealNode {
    RevealNode::new(key)
        .motion(motion)
        .transition(AnimationSpec::tween(
            web_time::Duration::from_millis(duration_ms),
            Easing::EaseOut,
        ))
        .delay_ms(delay_ms)
}

/// Spring leaf; its duration is the spring's settle time.
pub(crate) fn spring_node(
    key: &str,
    motion: Motion,
    stiffness: f64,
    damping: f64,
    delay_ms: u64,
) -> RevealNode {
    RevealNode::new(key)
        .motion(motion)
        .transition(AnimationSpec::spring(stiffness, damping))
        .delay_ms(delay_ms)
}

/// Lowercase, dash-separated key fragment.
pub(crate) fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_anchor(kind.anchor()), Some(kind));
        }
        assert_eq!(SectionKind::from_anchor("#contact"), Some(SectionKind::CallToAction));
        assert_eq!(SectionKind::from_anchor("#careers"), None);
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Real Estate & Asset Management"), "real-estate-asset-management");
        assert_eq!(slug("SSS / GSIS / Pension"), "sss-gsis-pension");
        assert_eq!(slug("7-Eleven"), "7-eleven");
    }
}
