//! Viewport visibility tracking.
//!
//! The intersection mechanism itself is a [`ViewportObserver`]; trackers only
//! turn its entries into a boolean [`Signal`], optionally latching on the first
//! `true`. [`ScrollViewport`] is a geometric observer for headless runs and
//! tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{SlotMap, new_key_type};

use crate::geometry::Rect;
use crate::scope::current_scope;
use crate::signal::{Signal, signal};

new_key_type! {
    pub struct ObservationId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

static NEXT_ELEMENT: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    pub fn fresh() -> Self {
        ElementId(NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    /// Fraction of the element inside the viewport, in [0, 1].
    pub ratio: f32,
    pub is_intersecting: bool,
}

pub type IntersectionCallback = Rc<dyn Fn(IntersectionEntry)>;

/// Platform intersection primitive. Implementations deliver an entry when
/// observation starts and whenever the element crosses `threshold`.
pub trait ViewportObserver {
    fn observe(
        &self,
        element: ElementId,
        threshold: f32,
        callback: IntersectionCallback,
    ) -> ObservationId;

    fn unobserve(&self, id: ObservationId) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be inside the viewport.
    pub threshold: f32,
    /// Latch on the first `true`.
    pub once: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            once: false,
        }
    }
}

impl VisibilityOptions {
    pub fn amount(threshold: f32) -> Self {
        let clamped = threshold.clamp(0.0, 1.0);
        if clamped != threshold {
            log::warn!("visibility threshold {threshold} clamped to {clamped}");
        }
        Self {
            threshold: clamped,
            once: false,
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Whether `ratio` counts as visible. A zero threshold means "any overlap".
    pub fn satisfied_by(&self, ratio: f32, is_intersecting: bool) -> bool {
        if self.threshold <= 0.0 {
            is_intersecting || ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }
}

struct TrackerState {
    options: VisibilityOptions,
    latched: bool,
    disposed: bool,
    observation: Option<ObservationId>,
}

/// Boolean "is this element on screen" signal for one element.
pub struct VisibilityTracker {
    element: ElementId,
    signal: Signal<bool>,
    state: Rc<RefCell<TrackerState>>,
    observer: Weak<dyn ViewportObserver>,
    flips: Rc<Cell<u32>>,
}

impl VisibilityTracker {
    pub fn observe(
        observer: &Rc<dyn ViewportObserver>,
        element: ElementId,
        options: VisibilityOptions,
    ) -> Self {
        let options = VisibilityOptions {
            once: options.once,
            ..VisibilityOptions::amount(options.threshold)
        };
        let signal = signal(false);
        let state = Rc::new(RefCell::new(TrackerState {
            options,
            latched: false,
            disposed: false,
            observation: None,
        }));
        let flips = Rc::new(Cell::new(0));
        let weak_observer = Rc::downgrade(observer);

        let callback: IntersectionCallback = {
            let signal = signal.clone();
            let state = Rc::downgrade(&state);
            let observer = weak_observer.clone();
            let flips = flips.clone();
            Rc::new(move |entry: IntersectionEntry| {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let (meets, stop) = {
                    let mut st = state.borrow_mut();
                    if st.disposed || st.latched {
                        return;
                    }
                    let meets = st.options.satisfied_by(entry.ratio, entry.is_intersecting);
                    let stop = if meets && st.options.once {
                        st.latched = true;
                        st.observation.take()
                    } else {
                        None
                    };
                    (meets, stop)
                };
                if signal.set_if_changed(meets) {
                    flips.set(flips.get() + 1);
                    log::debug!(
                        "element {:?} visible={meets} (ratio {:.2})",
                        entry.element,
                        entry.ratio
                    );
                }
                if let (Some(id), Some(obs)) = (stop, observer.upgrade()) {
                    obs.unobserve(id);
                }
            })
        };

        let id = observer.observe(element, options.threshold, callback);
        {
            let mut st = state.borrow_mut();
            if st.latched {
                // latched during the initial entry; nothing more to hear
                drop(st);
                observer.unobserve(id);
            } else {
                st.observation = Some(id);
            }
        }

        if let Some(scope) = current_scope() {
            let state = Rc::downgrade(&state);
            let observer = weak_observer.clone();
            scope.add_disposer(move || {
                if let Some(state) = state.upgrade() {
                    stop_tracking(&state, &observer);
                }
            });
        }

        Self {
            element,
            signal,
            state,
            observer: weak_observer,
            flips,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn signal(&self) -> Signal<bool> {
        self.signal.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.signal.get()
    }

    pub fn is_latched(&self) -> bool {
        self.state.borrow().latched
    }

    /// Number of times the signal changed value.
    pub fn flips(&self) -> u32 {
        self.flips.get()
    }

    /// Stops observing. Idempotent; the signal keeps its last value.
    pub fn dispose(&self) {
        stop_tracking(&self.state, &self.observer);
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }
}

fn stop_tracking(state: &RefCell<TrackerState>, observer: &Weak<dyn ViewportObserver>) {
    let id = {
        let mut st = state.borrow_mut();
        st.disposed = true;
        st.observation.take()
    };
    if let (Some(id), Some(obs)) = (id, observer.upgrade()) {
        obs.unobserve(id);
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}

struct Observation {
    element: ElementId,
    threshold: f32,
    callback: IntersectionCallback,
    last: Option<bool>,
}

struct ViewportState {
    viewport: Rect,
    layout: HashMap<ElementId, Rect>,
    observations: SlotMap<ObservationId, Observation>,
}

/// Geometric viewport over a vertically scrolling document.
pub struct ScrollViewport {
    state: RefCell<ViewportState>,
}

impl ScrollViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            state: RefCell::new(ViewportState {
                viewport: Rect::new(0.0, 0.0, width, height),
                layout: HashMap::new(),
                observations: SlotMap::with_key(),
            }),
        }
    }

    pub fn viewport(&self) -> Rect {
        self.state.borrow().viewport
    }

    pub fn scroll_y(&self) -> f32 {
        self.state.borrow().viewport.y
    }

    pub fn observation_count(&self) -> usize {
        self.state.borrow().observations.len()
    }

    pub fn set_layout(&self, element: ElementId, rect: Rect) {
        self.state.borrow_mut().layout.insert(element, rect);
        self.refresh();
    }

    pub fn scroll_to(&self, y: f32) {
        self.state.borrow_mut().viewport.y = y.max(0.0);
        self.refresh();
    }

    /// Re-evaluates every observation and delivers entries for the ones that
    /// crossed their threshold.
    pub fn refresh(&self) {
        let due: Vec<(IntersectionCallback, IntersectionEntry)> = {
            let mut st = self.state.borrow_mut();
            let st = &mut *st;
            let mut due = Vec::new();
            for obs in st.observations.values_mut() {
                let entry = Self::entry_for_parts(&st.layout, &st.viewport, obs.element)
                    .unwrap_or(IntersectionEntry {
                        element: obs.element,
                        ratio: 0.0,
                        is_intersecting: false,
                    });
                let meets = VisibilityOptions {
                    threshold: obs.threshold,
                    once: false,
                }
                .satisfied_by(entry.ratio, entry.is_intersecting);
                if obs.last != Some(meets) {
                    obs.last = Some(meets);
                    due.push((obs.callback.clone(), entry));
                }
            }
            due
        };
        for (callback, entry) in due {
            callback(entry);
        }
    }

    fn entry_for_parts(
        layout: &HashMap<ElementId, Rect>,
        viewport: &Rect,
        element: ElementId,
    ) -> Option<IntersectionEntry> {
        let rect = layout.get(&element)?;
        let ratio = rect.visible_fraction(viewport);
        Some(IntersectionEntry {
            element,
            ratio,
            is_intersecting: ratio > 0.0,
        })
    }
}

impl ViewportObserver for ScrollViewport {
    fn observe(
        &self,
        element: ElementId,
        threshold: f32,
        callback: IntersectionCallback,
    ) -> ObservationId {
        let (id, initial) = {
            let mut st = self.state.borrow_mut();
            let initial = Self::entry_for_parts(&st.layout, &st.viewport, element);
            let last = initial.map(|e| {
                VisibilityOptions {
                    threshold,
                    once: false,
                }
                .satisfied_by(e.ratio, e.is_intersecting)
            });
            let id = st.observations.insert(Observation {
                element,
                threshold,
                callback: callback.clone(),
                last,
            });
            (id, initial)
        };
        // Unlaid-out elements get no initial entry and stay hidden.
        if let Some(entry) = initial {
            callback(entry);
        }
        id
    }

    fn unobserve(&self, id: ObservationId) -> bool {
        self.state.borrow_mut().observations.remove(id).is_some()
    }
}
