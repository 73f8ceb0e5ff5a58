//! The whole page: sections stacked top to bottom over one scrolling viewport.

use std::rc::Rc;

use amalgated_core::{ElementId, FrameScheduler, Rect, Scope, ScrollViewport, ViewportObserver};
use web_time::Instant;

use crate::assets::AssetRegistry;
use crate::config::PageOptions;
use crate::error::{Result, SiteError};
use crate::sections::{ElementHost, PageSection, SectionCtx, SectionKind};
use crate::view::{Column, View};

/// Headless layout: every claimed element gets a fresh id placed at `rect`.
impl ElementHost for ScrollViewport {
    fn element(&self, name: &str, rect: Rect) -> ElementId {
        let id = ElementId::fresh();
        log::trace!("laid out '{name}' as {id:?} at y={} h={}", rect.y, rect.h);
        self.set_layout(id, rect);
        id
    }
}

struct Mounted {
    kind: SectionKind,
    rect: Rect,
    section: Box<dyn PageSection>,
}

/// Every section, stacked top to bottom and mounted inside one scope.
///
/// Independent of where elements come from: [`Page`] stacks it over a
/// headless [`ScrollViewport`], the browser runner over the live document.
pub struct SectionStack {
    scope: Option<Scope>,
    sections: Vec<Mounted>,
    height: f32,
}

impl SectionStack {
    pub fn mount(
        options: &PageOptions,
        assets: AssetRegistry,
        host: Rc<dyn ElementHost>,
        observer: Rc<dyn ViewportObserver>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        let assets = Rc::new(assets);
        let scope = Scope::new();

        let mut y = 0.0;
        let sections = scope.run(|| {
            SectionKind::ALL
                .into_iter()
                .map(|kind| {
                    let rect = Rect::new(
                        0.0,
                        y,
                        options.viewport_width,
                        kind.height(options.viewport_height),
                    );
                    y += rect.h;
                    let ctx = SectionCtx {
                        host: host.clone(),
                        observer: observer.clone(),
                        scheduler: scheduler.clone(),
                        assets: assets.clone(),
                        rect,
                        copyright_year: options.copyright_year,
                    };
                    Mounted {
                        kind,
                        rect,
                        section: kind.mount(&ctx),
                    }
                })
                .collect::<Vec<_>>()
        });

        Self {
            scope: Some(scope),
            sections,
            height: y,
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn anchors(&self) -> Vec<&'static str> {
        self.sections.iter().map(|m| m.kind.anchor()).collect()
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rect(&self, anchor: &str) -> Option<Rect> {
        self.find(anchor).map(|m| m.rect)
    }

    pub fn in_view(&self, anchor: &str) -> Option<bool> {
        self.find(anchor).map(|m| m.section.in_view())
    }

    fn find(&self, anchor: &str) -> Option<&Mounted> {
        let kind = SectionKind::from_anchor(anchor)?;
        self.sections.iter().find(|m| m.kind == kind)
    }

    /// Samples every section at `now`.
    pub fn render(&self, now: Instant) -> View {
        Column()
            .key("page")
            .with_children(self.sections.iter().map(|m| m.section.render(now)).collect())
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_some()
    }

    /// Stops every tracker and cancels pending frames and timers. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.dispose();
            self.sections.clear();
        }
    }
}

impl Drop for SectionStack {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mounted page. Dropping it (or calling [`Page::unmount`]) disposes every
/// tracker, animator and pending frame callback the sections created.
pub struct Page {
    viewport: Rc<ScrollViewport>,
    stack: SectionStack,
}

impl Page {
    pub fn mount(
        options: &PageOptions,
        assets: AssetRegistry,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        let viewport = Rc::new(ScrollViewport::new(
            options.viewport_width,
            options.viewport_height,
        ));
        let stack = SectionStack::mount(
            options,
            assets,
            viewport.clone(),
            viewport.clone(),
            scheduler,
        );
        log::info!(
            "page mounted: {} sections, {}px tall, {} observations",
            stack.len(),
            stack.height(),
            viewport.observation_count()
        );
        Self { viewport, stack }
    }

    pub fn viewport(&self) -> &Rc<ScrollViewport> {
        &self.viewport
    }

    pub fn anchors(&self) -> Vec<&'static str> {
        self.stack.anchors()
    }

    pub fn content_height(&self) -> f32 {
        self.stack.height()
    }

    pub fn section_rect(&self, anchor: &str) -> Option<Rect> {
        self.stack.rect(anchor)
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport.viewport().h).max(0.0)
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y()
    }

    /// Clamped to `0..=max_scroll()`.
    pub fn scroll_to(&self, y: f32) {
        self.viewport.scroll_to(y.clamp(0.0, self.max_scroll()));
    }

    /// Jumps to the top of the section with `anchor` (`#` optional) and
    /// returns the resulting scroll offset.
    pub fn scroll_to_anchor(&self, anchor: &str) -> Result<f32> {
        let anchor = anchor.trim_start_matches('#');
        let rect = self
            .section_rect(anchor)
            .ok_or_else(|| SiteError::UnknownAnchor(anchor.to_string()))?;
        self.scroll_to(rect.y);
        log::debug!("scrolled to #{anchor} at {}", self.scroll_y());
        Ok(self.scroll_y())
    }

    /// Whether the section's own tracker reports it on screen.
    pub fn in_view(&self, anchor: &str) -> Option<bool> {
        self.stack.in_view(anchor)
    }

    /// Samples every section at `now`.
    pub fn frame(&self, now: Instant) -> View {
        self.stack.render(now)
    }

    pub fn is_mounted(&self) -> bool {
        self.stack.is_mounted()
    }

    pub fn unmount(&mut self) {
        if self.stack.is_mounted() {
            self.stack.dispose();
            log::info!("page unmounted");
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}
