//! Scripted scroll through the page without a browser.
//!
//! The runner owns a [`FrameLoop`] over the given clock, mounts the page,
//! and on every tick moves the viewport, pumps due frames and timers, and
//! notes which sections have come into view. With [`SystemClock`] and a real
//! sleep it plays back in wall time; with a `TestClock` and a sleep that
//! advances it, the same run is instant and deterministic.

use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use amalgated_core::SystemClock;
use amalgated_core::{Clock, FrameLoop};
use amalgated_site::{Page, PageOptions, SiteError, View};
use web_time::{Duration, Instant};

use crate::{PlatformError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollScript {
    /// Px per second.
    pub speed: f32,
    pub start_delay: Duration,
    /// Stop at this section's top (`#` optional) instead of the page bottom.
    pub target: Option<String>,
    /// How long to keep ticking once the stop position is reached.
    pub settle: Duration,
    pub max_duration: Duration,
}

impl Default for ScrollScript {
    fn default() -> Self {
        Self {
            speed: 1200.0,
            start_delay: Duration::ZERO,
            target: None,
            settle: Duration::from_secs(2),
            max_duration: Duration::from_secs(60),
        }
    }
}

impl ScrollScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(mut self, px_per_sec: f32) -> Self {
        self.speed = px_per_sec;
        self
    }

    pub fn start_delay(mut self, d: Duration) -> Self {
        self.start_delay = d;
        self
    }

    pub fn target(mut self, anchor: impl Into<String>) -> Self {
        self.target = Some(anchor.into());
        self
    }

    pub fn settle(mut self, d: Duration) -> Self {
        self.settle = d;
        self
    }

    pub fn max_duration(mut self, d: Duration) -> Self {
        self.max_duration = d;
        self
    }
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub ticks: u64,
    pub frames_run: u64,
    pub timers_run: u64,
    pub elapsed: Duration,
    pub final_scroll: f32,
    /// Sections in the order they first overlapped the viewport, with the
    /// time since the run started.
    pub seen: Vec<(&'static str, Duration)>,
    /// The page as rendered on the last tick.
    pub final_view: View,
    /// Tasks still queued after unmounting.
    pub leaked_tasks: usize,
}

impl RunReport {
    pub fn seen_at(&self, anchor: &str) -> Option<Duration> {
        let anchor = anchor.trim_start_matches('#');
        self.seen
            .iter()
            .find(|(a, _)| *a == anchor)
            .map(|(_, at)| *at)
    }

    pub fn texts_of(&self, anchor: &str) -> Vec<&str> {
        self.final_view
            .find_section(anchor.trim_start_matches('#'))
            .map(View::texts)
            .unwrap_or_default()
    }
}

/// Wall-clock run: real time, real sleeps.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_headless(options: &PageOptions, script: &ScrollScript) -> Result<RunReport> {
    run_headless_with(options, script, Rc::new(SystemClock), std::thread::sleep)
}

pub fn run_headless_with(
    options: &PageOptions,
    script: &ScrollScript,
    clock: Rc<dyn Clock>,
    mut sleep: impl FnMut(Duration),
) -> Result<RunReport> {
    if !(script.speed > 0.0) {
        return Err(PlatformError::InvalidSpeed(script.speed));
    }
    let tick = options.frame_interval();
    let frames = Rc::new(FrameLoop::new(clock.clone()).with_frame_interval(tick));
    let mut page = Page::mount(options, options.load_assets()?, frames.clone());

    let stop_at = match &script.target {
        Some(anchor) => {
            let rect = page.section_rect(anchor).ok_or_else(|| {
                SiteError::UnknownAnchor(anchor.trim_start_matches('#').to_string())
            })?;
            rect.y.min(page.max_scroll())
        }
        None => page.max_scroll(),
    };
    log::info!(
        "scrolling to {stop_at}px at {} px/s, {} ms frames",
        script.speed,
        tick.as_millis()
    );

    let start = clock.now();
    let mut seen = Vec::new();
    let mut reached: Option<Instant> = None;
    let mut ticks = 0u64;
    loop {
        let now = clock.now();
        let elapsed = now.saturating_duration_since(start);
        let scrolled = elapsed.saturating_sub(script.start_delay).as_secs_f32() * script.speed;
        let y = scrolled.min(stop_at);
        if y != page.scroll_y() {
            page.scroll_to(y);
        }
        frames.pump();
        ticks += 1;
        note_seen(&page, &mut seen, elapsed);

        if reached.is_none() && page.scroll_y() >= stop_at {
            log::info!("reached {stop_at}px after {} ms", elapsed.as_millis());
            reached = Some(now);
        }
        if let Some(at) = reached
            && now.saturating_duration_since(at) >= script.settle
        {
            break;
        }
        if elapsed >= script.max_duration {
            log::warn!(
                "scroll script stopped at its {} ms limit",
                script.max_duration.as_millis()
            );
            break;
        }
        sleep(tick);
    }

    let end = clock.now();
    let final_view = page.frame(end);
    let final_scroll = page.scroll_y();
    page.unmount();
    let leaked_tasks = frames.pending();
    if leaked_tasks > 0 {
        log::warn!("{leaked_tasks} tasks still queued after unmount");
    }

    Ok(RunReport {
        ticks,
        frames_run: frames.frames_run(),
        timers_run: frames.timers_run(),
        elapsed: end.saturating_duration_since(start),
        final_scroll,
        seen,
        final_view,
        leaked_tasks,
    })
}

fn note_seen(page: &Page, seen: &mut Vec<(&'static str, Duration)>, at: Duration) {
    let viewport = page.viewport().viewport();
    for anchor in page.anchors() {
        if seen.iter().any(|(a, _)| *a == anchor) {
            continue;
        }
        let overlaps = page
            .section_rect(anchor)
            .is_some_and(|r| r.intersection(&viewport).is_some());
        if overlaps {
            log::info!("#{anchor} in view at {} ms", at.as_millis());
            seen.push((anchor, at));
        }
    }
}
