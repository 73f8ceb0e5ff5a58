//! Frame and timer scheduling.
//!
//! Animations never block: they ask a [`FrameScheduler`] to call them back on
//! the next frame or at an instant, and keep the returned [`TaskId`] so teardown
//! can cancel the callback. [`FrameLoop`] is the in-process implementation used
//! by the headless runner and by tests; the web platform maps the same trait
//! onto `requestAnimationFrame` / `setTimeout`.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::animation::{Clock, TestClock};

new_key_type! {
    pub struct TaskId;
}

pub type TaskFn = Box<dyn FnOnce(Instant)>;

pub trait FrameScheduler {
    fn now(&self) -> Instant;

    /// Runs `f` with the frame timestamp on the next frame.
    fn request_frame(&self, f: TaskFn) -> TaskId;

    /// Runs `f` once the clock reaches `at`.
    fn schedule_at(&self, at: Instant, f: TaskFn) -> TaskId;

    /// Returns false when the task already ran or was cancelled.
    fn cancel(&self, id: TaskId) -> bool;

    fn schedule_after(&self, delay: Duration, f: TaskFn) -> TaskId {
        self.schedule_at(self.now() + delay, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    Frame,
    Timer,
}

struct Task {
    due: Instant,
    seq: u64,
    kind: TaskKind,
    run: TaskFn,
}

struct LoopState {
    tasks: SlotMap<TaskId, Task>,
    seq: u64,
    frames_run: u64,
    timers_run: u64,
}

/// Task queue over an injected clock. Frames land on a fixed grid of
/// `frame_interval` ticks so every animator samples the same timestamps.
pub struct FrameLoop {
    clock: Rc<dyn Clock>,
    origin: Instant,
    frame_interval: Duration,
    state: RefCell<LoopState>,
}

const MAX_TASKS_PER_PUMP: usize = 10_000;

impl FrameLoop {
    pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

    pub fn new(clock: Rc<dyn Clock>) -> Self {
        let origin = clock.now();
        Self {
            clock,
            origin,
            frame_interval: Self::DEFAULT_FRAME_INTERVAL,
            state: RefCell::new(LoopState {
                tasks: SlotMap::with_key(),
                seq: 0,
                frames_run: 0,
                timers_run: 0,
            }),
        }
    }

    /// Loop over a fresh [`TestClock`]; returns both.
    pub fn manual() -> (Rc<Self>, TestClock) {
        let clock = TestClock::new();
        (Rc::new(Self::new(Rc::new(clock.clone()))), clock)
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        if interval.is_zero() {
            log::warn!("frame interval of zero ignored");
        } else {
            self.frame_interval = interval;
        }
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    pub fn frames_run(&self) -> u64 {
        self.state.borrow().frames_run
    }

    pub fn timers_run(&self) -> u64 {
        self.state.borrow().timers_run
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.state.borrow().tasks.values().map(|t| t.due).min()
    }

    fn next_frame_after(&self, now: Instant) -> Instant {
        let step = self.frame_interval.as_nanos().max(1);
        let elapsed = now.saturating_duration_since(self.origin).as_nanos();
        let ticks = elapsed / step + 1;
        self.origin + Duration::from_nanos((ticks * step) as u64)
    }

    fn push(&self, due: Instant, kind: TaskKind, run: TaskFn) -> TaskId {
        let mut st = self.state.borrow_mut();
        st.seq += 1;
        let seq = st.seq;
        st.tasks.insert(Task {
            due,
            seq,
            kind,
            run,
        })
    }

    fn take_due(&self, now: Instant) -> Option<Task> {
        let mut st = self.state.borrow_mut();
        let id = st
            .tasks
            .iter()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(id, _)| id)?;
        let task = st.tasks.remove(id)?;
        match task.kind {
            TaskKind::Frame => st.frames_run += 1,
            TaskKind::Timer => st.timers_run += 1,
        }
        Some(task)
    }

    /// Runs every task due at the current clock time, earliest first.
    /// Tasks scheduled while pumping run too if they are already due.
    pub fn pump(&self) -> usize {
        let now = self.clock.now();
        let mut ran = 0;
        while let Some(task) = self.take_due(now) {
            (task.run)(now);
            ran += 1;
            if ran >= MAX_TASKS_PER_PUMP {
                log::warn!("frame loop: {ran} tasks in one pump, deferring the rest");
                break;
            }
        }
        ran
    }

    /// Steps `clock` forward by `d`, stopping at every due task so each one
    /// observes its exact due time. `clock` must be the clock this loop reads.
    pub fn advance(&self, clock: &TestClock, d: Duration) -> usize {
        let target = clock.now() + d;
        let mut ran = 0;
        while let Some(due) = self.next_due() {
            if due > target {
                break;
            }
            clock.set(due);
            ran += self.pump();
        }
        clock.set(target);
        ran + self.pump()
    }

    /// Advances until nothing is pending or `limit` has elapsed.
    pub fn run_until_idle(&self, clock: &TestClock, limit: Duration) -> usize {
        let deadline = clock.now() + limit;
        let mut ran = 0;
        while let Some(due) = self.next_due() {
            if due > deadline {
                break;
            }
            clock.set(due);
            ran += self.pump();
        }
        ran
    }
}

impl FrameScheduler for FrameLoop {
    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn request_frame(&self, f: TaskFn) -> TaskId {
        let due = self.next_frame_after(self.clock.now());
        self.push(due, TaskKind::Frame, f)
    }

    fn schedule_at(&self, at: Instant, f: TaskFn) -> TaskId {
        self.push(at, TaskKind::Timer, f)
    }

    fn cancel(&self, id: TaskId) -> bool {
        self.state.borrow_mut().tasks.remove(id).is_some()
    }
}
