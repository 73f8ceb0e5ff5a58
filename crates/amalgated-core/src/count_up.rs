//! Numbers that count up once their element scrolls into view.
//!
//! [`CountUp`] is the pure state machine: feed it timestamps and it returns
//! the eased value. [`CountUpAnimator`] binds one to a visibility signal and a
//! [`FrameScheduler`], re-sampling every frame until the target is reached.
//!
//! Interpolation is done in `f64`; `decimals` is only carried along for the
//! formatter that eventually displays the value.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use web_time::{Duration, Instant};

use crate::animation::ease_out_cubic;
use crate::frame::{FrameScheduler, TaskId};
use crate::scope::current_scope;
use crate::signal::{Signal, SubId, signal};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountUpOptions {
    pub duration: Duration,
    pub decimals: u8,
    pub start: f64,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1600),
            decimals: 0,
            start: 0.0,
        }
    }
}

impl CountUpOptions {
    /// Negative durations are treated as zero.
    pub fn duration_ms(ms: i64) -> Self {
        Self {
            duration: Duration::from_millis(ms.max(0) as u64),
            ..Self::default()
        }
    }

    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn starting_from(mut self, start: f64) -> Self {
        self.start = start;
        self
    }
}

/// One-way lifecycle: `NotStarted -> Running -> Finished`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountUpPhase {
    NotStarted,
    Running { started_at: Instant },
    Finished,
}

/// `start + ease_out_cubic(elapsed / duration) * (target - start)`, pinned to
/// `target` once `elapsed >= duration`.
pub fn count_up_value(start: f64, target: f64, duration: Duration, elapsed: Duration) -> f64 {
    if duration.is_zero() || elapsed >= duration {
        return target;
    }
    let t = (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
    start + ease_out_cubic(t) * (target - start)
}

#[derive(Clone, Debug)]
pub struct CountUp {
    target: f64,
    options: CountUpOptions,
    phase: CountUpPhase,
    current: f64,
}

impl CountUp {
    pub fn new(target: f64, options: CountUpOptions) -> Self {
        Self {
            target,
            options,
            phase: CountUpPhase::NotStarted,
            current: options.start,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn decimals(&self) -> u8 {
        self.options.decimals
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn phase(&self) -> CountUpPhase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        !matches!(self.phase, CountUpPhase::NotStarted)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, CountUpPhase::Finished)
    }

    /// Starts the count at `now`. Returns false if it had already started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.has_started() {
            return false;
        }
        if self.options.duration.is_zero() {
            self.current = self.target;
            self.phase = CountUpPhase::Finished;
        } else {
            self.current = self.options.start;
            self.phase = CountUpPhase::Running { started_at: now };
        }
        true
    }

    /// Updates and returns the value at `now`.
    pub fn sample(&mut self, now: Instant) -> f64 {
        if let CountUpPhase::Running { started_at } = self.phase {
            let elapsed = now.saturating_duration_since(started_at);
            self.current =
                count_up_value(self.options.start, self.target, self.options.duration, elapsed);
            if elapsed >= self.options.duration {
                self.current = self.target;
                self.phase = CountUpPhase::Finished;
            }
        }
        self.current
    }
}

struct AnimatorInner {
    state: RefCell<CountUp>,
    value: Signal<f64>,
    scheduler: Rc<dyn FrameScheduler>,
    visibility: Signal<bool>,
    subscription: Cell<Option<SubId>>,
    frame: Cell<Option<TaskId>>,
    disposed: Cell<bool>,
    writes: Cell<u64>,
}

impl AnimatorInner {
    fn start(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }
        let now = self.scheduler.now();
        let (started, finished, value) = {
            let mut st = self.state.borrow_mut();
            let started = st.start(now);
            (started, st.is_finished(), st.value())
        };
        if !started {
            return;
        }
        // Start-once: later visibility changes are irrelevant.
        if let Some(id) = self.subscription.take() {
            self.visibility.unsubscribe(id);
        }
        self.write(value);
        if finished {
            self.log_finished();
        } else {
            self.request_frame();
        }
    }

    fn request_frame(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let id = self.scheduler.request_frame(Box::new(move |now| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame(now);
            }
        }));
        self.frame.set(Some(id));
    }

    fn on_frame(self: &Rc<Self>, now: Instant) {
        if self.disposed.get() {
            return;
        }
        self.frame.set(None);
        let (value, finished) = {
            let mut st = self.state.borrow_mut();
            let v = st.sample(now);
            (v, st.is_finished())
        };
        self.write(value);
        if finished {
            self.log_finished();
        } else {
            self.request_frame();
        }
    }

    fn write(&self, value: f64) {
        self.writes.set(self.writes.get() + 1);
        self.value.set(value);
    }

    fn log_finished(&self) {
        log::info!("count-up reached {}", self.state.borrow().target());
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(id) = self.frame.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.subscription.take() {
            self.visibility.unsubscribe(id);
        }
    }
}

/// Live count-up bound to a visibility signal.
///
/// Starts the first time the signal is `true` (immediately if it already is)
/// and ignores every later change. Dropping or disposing the animator cancels
/// its pending frame; when created inside a [`Scope`](crate::scope::Scope) it
/// is also disposed with that scope.
pub struct CountUpAnimator {
    inner: Rc<AnimatorInner>,
}

impl CountUpAnimator {
    pub fn new(
        target: f64,
        visibility: &Signal<bool>,
        scheduler: Rc<dyn FrameScheduler>,
        options: CountUpOptions,
    ) -> Self {
        let inner = Rc::new(AnimatorInner {
            state: RefCell::new(CountUp::new(target, options)),
            value: signal(options.start),
            scheduler,
            visibility: visibility.clone(),
            subscription: Cell::new(None),
            frame: Cell::new(None),
            disposed: Cell::new(false),
            writes: Cell::new(0),
        });

        let weak = Rc::downgrade(&inner);
        let sub = visibility.subscribe(move |visible| {
            if !*visible {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.start();
            }
        });
        inner.subscription.set(Some(sub));

        if let Some(scope) = current_scope() {
            let weak = Rc::downgrade(&inner);
            scope.add_disposer(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.dispose();
                }
            });
        }

        if visibility.get() {
            inner.start();
        }

        Self { inner }
    }

    pub fn value(&self) -> f64 {
        self.inner.value.get()
    }

    pub fn value_signal(&self) -> Signal<f64> {
        self.inner.value.clone()
    }

    pub fn target(&self) -> f64 {
        self.inner.state.borrow().target()
    }

    pub fn decimals(&self) -> u8 {
        self.inner.state.borrow().decimals()
    }

    pub fn phase(&self) -> CountUpPhase {
        self.inner.state.borrow().phase()
    }

    pub fn is_finished(&self) -> bool {
        self.inner.state.borrow().is_finished()
    }

    /// How many times the value signal has been written.
    pub fn writes(&self) -> u64 {
        self.inner.writes.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl Drop for CountUpAnimator {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}
