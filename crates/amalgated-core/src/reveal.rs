//! Staggered entrance choreography.
//!
//! A section describes its entrance as a tree of [`RevealNode`]s. Each node
//! has a hidden/visible [`Motion`], its own transition (whose `delay` is the
//! node's extra delay), and an optional [`Stagger`] for its children. The
//! scheduling math is the pure [`schedule`] function; [`RevealChoreographer`]
//! turns it into per-node `Hidden -> Pending -> Visible` state driven by a
//! visibility signal.
//!
//! Effective delay of child `i` of `parent`:
//!
//! ```text
//! delay(child) = delay(parent) + parent.delay_children
//!              + i * parent.stagger_children + child.transition.delay
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use web_time::{Duration, Instant};

use crate::animation::AnimationSpec;
use crate::frame::{FrameScheduler, TaskId};
use crate::motion::{Motion, Pose};
use crate::scope::current_scope;
use crate::signal::{Signal, SubId, signal};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stagger {
    pub stagger_children: Duration,
    pub delay_children: Duration,
}

impl Stagger {
    pub fn ms(stagger_children: u64, delay_children: u64) -> Self {
        Self {
            stagger_children: Duration::from_millis(stagger_children),
            delay_children: Duration::from_millis(delay_children),
        }
    }

    /// Extra delay for the child at `index`.
    pub fn offset(&self, index: usize) -> Duration {
        self.delay_children + self.stagger_children * index as u32
    }
}

#[derive(Clone, Debug)]
pub struct RevealNode {
    pub key: String,
    pub motion: Motion,
    pub transition: AnimationSpec,
    pub stagger: Stagger,
    pub children: Vec<RevealNode>,
}

impl RevealNode {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            motion: Motion::none(),
            transition: AnimationSpec::out_ms(500),
            stagger: Stagger::default(),
            children: Vec::new(),
        }
    }

    /// Orchestrating parent with the given stagger, in milliseconds.
    pub fn group(key: impl Into<String>, stagger_ms: u64, delay_children_ms: u64) -> Self {
        Self::new(key).stagger(Stagger::ms(stagger_ms, delay_children_ms))
    }

    pub fn motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Replaces the transition, keeping the node's current delay.
    pub fn transition(mut self, transition: AnimationSpec) -> Self {
        let delay = self.transition.delay;
        self.transition = transition;
        if self.transition.delay.is_zero() {
            self.transition.delay = delay;
        }
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.transition.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn child(mut self, child: RevealNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RevealNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RevealNode::node_count).sum::<usize>()
    }
}

/// One node of a flattened, scheduled tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledReveal {
    pub key: String,
    /// Pre-order position; ties in `delay` fire in this order.
    pub order: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    /// Index among its siblings.
    pub index: usize,
    /// Offset from activation at which the node becomes visible.
    pub delay: Duration,
    pub motion: Motion,
    pub transition: AnimationSpec,
}

/// Flattens `root` in pre-order with every node's effective delay.
pub fn schedule(root: &RevealNode) -> Vec<ScheduledReveal> {
    let mut out = Vec::with_capacity(root.node_count());
    walk(root, root.transition.delay, None, 0, 0, &mut out);
    out
}

fn walk(
    node: &RevealNode,
    delay: Duration,
    parent: Option<usize>,
    depth: usize,
    index: usize,
    out: &mut Vec<ScheduledReveal>,
) {
    let order = out.len();
    out.push(ScheduledReveal {
        key: node.key.clone(),
        order,
        parent,
        depth,
        index,
        delay,
        motion: node.motion,
        transition: node.transition,
    });
    for (i, child) in node.children.iter().enumerate() {
        let child_delay = delay + node.stagger.offset(i) + child.transition.delay;
        walk(child, child_delay, Some(order), depth + 1, i, out);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealPhase {
    Hidden,
    Pending { fire_at: Instant },
    Visible { since: Instant },
}

impl RevealPhase {
    pub fn is_visible(&self) -> bool {
        matches!(self, RevealPhase::Visible { .. })
    }
}

struct NodeSlot {
    plan: ScheduledReveal,
    children: SmallVec<[usize; 4]>,
    phase: Signal<RevealPhase>,
    timer: Option<TaskId>,
}

struct ChoreoInner {
    nodes: RefCell<Vec<NodeSlot>>,
    index: HashMap<String, usize>,
    scheduler: Rc<dyn FrameScheduler>,
    visibility: Signal<bool>,
    subscription: Cell<Option<SubId>>,
    active: Cell<bool>,
    generation: Cell<u64>,
    activations: Cell<u32>,
    disposed: Cell<bool>,
    writes: Cell<u64>,
}

impl ChoreoInner {
    fn write(&self, phase: &Signal<RevealPhase>, value: RevealPhase) {
        self.writes.set(self.writes.get() + 1);
        phase.set(value);
    }

    fn activate(self: &Rc<Self>) {
        if self.disposed.get() || self.active.replace(true) {
            return;
        }
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.activations.set(self.activations.get() + 1);

        let now = self.scheduler.now();
        let mut writes = Vec::new();
        {
            let mut nodes = self.nodes.borrow_mut();
            for (i, slot) in nodes.iter_mut().enumerate() {
                let fire_at = now + slot.plan.delay;
                let weak: Weak<Self> = Rc::downgrade(self);
                let id = self.scheduler.schedule_at(
                    fire_at,
                    Box::new(move |_now| {
                        if let Some(inner) = weak.upgrade() {
                            inner.fire(i, generation, fire_at);
                        }
                    }),
                );
                slot.timer = Some(id);
                writes.push((slot.phase.clone(), RevealPhase::Pending { fire_at }));
            }
        }
        log::debug!(
            "reveal activated ({} nodes, generation {generation})",
            writes.len()
        );
        for (phase, value) in writes {
            self.write(&phase, value);
        }
    }

    fn fire(&self, i: usize, generation: u64, fire_at: Instant) {
        if self.disposed.get() || self.generation.get() != generation {
            return;
        }
        let phase = {
            let mut nodes = self.nodes.borrow_mut();
            let Some(slot) = nodes.get_mut(i) else {
                return;
            };
            slot.timer = None;
            log::debug!("reveal '{}' visible", slot.plan.key);
            slot.phase.clone()
        };
        self.write(&phase, RevealPhase::Visible { since: fire_at });
    }

    fn cancel_timers(&self) {
        let timers: Vec<TaskId> = self
            .nodes
            .borrow_mut()
            .iter_mut()
            .filter_map(|slot| slot.timer.take())
            .collect();
        for id in timers {
            self.scheduler.cancel(id);
        }
    }

    fn deactivate(&self) {
        if self.disposed.get() || !self.active.replace(false) {
            return;
        }
        self.generation.set(self.generation.get() + 1);
        self.cancel_timers();
        let phases: Vec<Signal<RevealPhase>> = self
            .nodes
            .borrow()
            .iter()
            .map(|slot| slot.phase.clone())
            .collect();
        for phase in phases {
            if phase.get() != RevealPhase::Hidden {
                self.write(&phase, RevealPhase::Hidden);
            }
        }
        log::debug!("reveal reset to hidden");
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.cancel_timers();
        if let Some(id) = self.subscription.take() {
            self.visibility.unsubscribe(id);
        }
    }
}

/// Drives a [`RevealNode`] tree from a visibility signal.
///
/// `true` schedules every node at `activation + delay`; `false` cancels what is
/// pending and resets the whole tree to `Hidden`, so the next activation
/// replays the sequence. With a latching tracker the signal never reverts and
/// `Visible` is terminal.
pub struct RevealChoreographer {
    inner: Rc<ChoreoInner>,
}

impl RevealChoreographer {
    pub fn new(
        root: RevealNode,
        visibility: &Signal<bool>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        let plan = schedule(&root);
        let mut index = HashMap::with_capacity(plan.len());
        let mut nodes: Vec<NodeSlot> = Vec::with_capacity(plan.len());
        for p in plan {
            if index.insert(p.key.clone(), p.order).is_some() {
                log::warn!("duplicate reveal key '{}'; lookups see the last one", p.key);
            }
            if let Some(parent) = p.parent {
                nodes[parent].children.push(p.order);
            }
            nodes.push(NodeSlot {
                plan: p,
                children: SmallVec::new(),
                phase: signal(RevealPhase::Hidden),
                timer: None,
            });
        }

        let inner = Rc::new(ChoreoInner {
            nodes: RefCell::new(nodes),
            index,
            scheduler,
            visibility: visibility.clone(),
            subscription: Cell::new(None),
            active: Cell::new(false),
            generation: Cell::new(0),
            activations: Cell::new(0),
            disposed: Cell::new(false),
            writes: Cell::new(0),
        });

        let weak = Rc::downgrade(&inner);
        let sub = visibility.subscribe(move |visible| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if *visible {
                inner.activate();
            } else {
                inner.deactivate();
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
            inner.activate();
        }

        Self { inner }
    }

    fn slot<R>(&self, key: &str, f: impl FnOnce(&NodeSlot) -> R) -> Option<R> {
        let i = *self.inner.index.get(key)?;
        self.inner.nodes.borrow().get(i).map(f)
    }

    pub fn len(&self) -> usize {
        self.inner.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner
            .nodes
            .borrow()
            .iter()
            .map(|slot| slot.plan.key.clone())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.index.contains_key(key)
    }

    /// The flattened schedule, pre-order.
    pub fn plan(&self) -> Vec<ScheduledReveal> {
        self.inner
            .nodes
            .borrow()
            .iter()
            .map(|slot| slot.plan.clone())
            .collect()
    }

    /// Keys of the direct children of `key`, in order.
    pub fn children_of(&self, key: &str) -> Vec<String> {
        let nodes = self.inner.nodes.borrow();
        let Some(&i) = self.inner.index.get(key) else {
            return Vec::new();
        };
        nodes[i]
            .children
            .iter()
            .map(|&c| nodes[c].plan.key.clone())
            .collect()
    }

    pub fn phase(&self, key: &str) -> Option<RevealPhase> {
        self.slot(key, |slot| slot.phase.get())
    }

    pub fn phase_signal(&self, key: &str) -> Option<Signal<RevealPhase>> {
        self.slot(key, |slot| slot.phase.clone())
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.phase(key).is_some_and(|p| p.is_visible())
    }

    /// Current pose of `key`. Unknown keys render at rest.
    pub fn pose(&self, key: &str, now: Instant) -> Pose {
        let found = self.slot(key, |slot| match slot.phase.get() {
            RevealPhase::Hidden | RevealPhase::Pending { .. } => slot.plan.motion.hidden,
            RevealPhase::Visible { since } => {
                let t = slot
                    .plan
                    .transition
                    .progress(now.saturating_duration_since(since));
                slot.plan.motion.at(t)
            }
        });
        found.unwrap_or_else(|| {
            log::warn!("no reveal node '{key}'");
            Pose::REST
        })
    }

    /// Every node is visible and its transition has finished.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.inner.nodes.borrow().iter().all(|slot| match slot.phase.get() {
            RevealPhase::Visible { since } => {
                now.saturating_duration_since(since) >= slot.plan.transition.duration
            }
            _ => false,
        })
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    pub fn activations(&self) -> u32 {
        self.inner.activations.get()
    }

    /// How many phase writes have happened so far.
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

impl Drop for RevealChoreographer {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}
