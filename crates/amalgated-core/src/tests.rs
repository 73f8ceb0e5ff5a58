#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;
    use web_time::{Duration, Instant};

    use crate::animation::*;
    use crate::count_up::*;
    use crate::frame::*;
    use crate::geometry::*;
    use crate::motion::*;
    use crate::reveal::*;
    use crate::scope::*;
    use crate::signal::*;
    use crate::visibility::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn viewport(h: f32) -> (Rc<ScrollViewport>, Rc<dyn ViewportObserver>) {
        let vp = Rc::new(ScrollViewport::new(1280.0, h));
        let obs: Rc<dyn ViewportObserver> = vp.clone();
        (vp, obs)
    }

    /// Forwards everything but refuses to cancel, so late callbacks still fire.
    struct NoCancel(Rc<FrameLoop>);

    impl FrameScheduler for NoCancel {
        fn now(&self) -> Instant {
            self.0.now()
        }
        fn request_frame(&self, f: TaskFn) -> TaskId {
            self.0.request_frame(f)
        }
        fn schedule_at(&self, at: Instant, f: TaskFn) -> TaskId {
            self.0.schedule_at(at, f)
        }
        fn cancel(&self, _id: TaskId) -> bool {
            false
        }
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = sig.subscribe({
            let seen = seen.clone();
            move |v| seen.borrow_mut().push(*v)
        });

        sig.set(42);
        assert!(sig.unsubscribe(id));
        sig.set(7);
        assert_eq!(*seen.borrow(), vec![42]);
        assert!(!sig.unsubscribe(id));
    }

    #[test]
    fn test_signal_subscriber_can_read_and_unsubscribe() {
        let sig = signal(1);
        let read = Rc::new(RefCell::new(0));
        let slot = Rc::new(RefCell::new(None::<SubId>));

        let id = sig.subscribe({
            let sig = sig.clone();
            let read = read.clone();
            let slot = slot.clone();
            move |_| {
                *read.borrow_mut() = sig.get();
                if let Some(id) = slot.borrow_mut().take() {
                    sig.unsubscribe(id);
                }
            }
        });
        *slot.borrow_mut() = Some(id);

        sig.set(5);
        assert_eq!(*read.borrow(), 5);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let sig = signal(false);
        let hits = Rc::new(RefCell::new(0));
        sig.subscribe({
            let hits = hits.clone();
            move |_| *hits.borrow_mut() += 1
        });
        assert!(!sig.set_if_changed(false));
        assert!(sig.set_if_changed(true));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let scope = Scope::new();
        let child = scope.child();
        scope.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("parent")
        });
        child.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("child")
        });

        assert!(order.borrow().is_empty());
        scope.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_rect_visible_fraction() {
        let el = Rect::new(0.0, 500.0, 100.0, 100.0);
        assert_eq!(el.visible_fraction(&Rect::new(0.0, 0.0, 1280.0, 400.0)), 0.0);
        assert_eq!(el.visible_fraction(&Rect::new(0.0, 150.0, 1280.0, 400.0)), 0.5);
        assert_eq!(el.visible_fraction(&Rect::new(0.0, 400.0, 1280.0, 400.0)), 1.0);
    }

    #[test]
    fn test_easing_curves() {
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);

        let curve = Easing::OUT_EXPO_LIKE;
        assert_eq!(curve.interpolate(0.0), 0.0);
        assert_eq!(curve.interpolate(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = curve.interpolate(i as f64 / 100.0);
            assert!(v >= prev - 1e-9, "bezier not monotonic at {i}");
            prev = v;
        }
        // strong ease-out: well past halfway at a quarter of the time
        assert!(curve.interpolate(0.25) > 0.6);

        let spring = Easing::Spring {
            stiffness: 200.0,
            damping: 18.0,
        };
        assert_eq!(spring.interpolate(1.0), 1.0);
        assert!((spring.interpolate(0.99) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_loop_orders_and_cancels() {
        let (frames, clock) = FrameLoop::manual();
        let log = Rc::new(RefCell::new(Vec::new()));
        let t0 = clock.now();

        let push = |tag: &'static str| -> TaskFn {
            let log = log.clone();
            Box::new(move |_| log.borrow_mut().push(tag))
        };
        frames.schedule_at(t0 + ms(30), push("b"));
        frames.schedule_at(t0 + ms(10), push("a"));
        frames.schedule_at(t0 + ms(30), push("c"));
        let dropped = frames.schedule_at(t0 + ms(20), push("x"));
        frames.request_frame(push("frame"));

        assert!(frames.cancel(dropped));
        assert!(!frames.cancel(dropped));
        frames.advance(&clock, ms(40));
        assert_eq!(*log.borrow(), vec!["a", "frame", "b", "c"]);
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.frames_run(), 1);
    }

    #[test]
    fn test_frames_land_on_grid() {
        let (frames, clock) = FrameLoop::manual();
        let t0 = clock.now();
        let seen = Rc::new(RefCell::new(None));
        clock.advance(ms(5));
        frames.request_frame({
            let seen = seen.clone();
            Box::new(move |now| *seen.borrow_mut() = Some(now))
        });
        frames.advance(&clock, ms(20));
        assert_eq!(*seen.borrow(), Some(t0 + ms(16)));
    }

    #[test]
    fn test_count_up_value_concrete() {
        let v = count_up_value(0.0, 1000.0, ms(1600), ms(800));
        assert_eq!(v, 875.0);
        assert_eq!(count_up_value(0.0, 1000.0, ms(1600), ms(1600)), 1000.0);
        assert_eq!(count_up_value(0.0, 1000.0, ms(1600), ms(5000)), 1000.0);
        assert_eq!(count_up_value(0.0, 1000.0, ms(1600), Duration::ZERO), 0.0);
    }

    #[test]
    fn test_count_up_animator_scenario() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(false);
        let counter =
            CountUpAnimator::new(1000.0, &visible, frames.clone(), CountUpOptions::default());

        // 496 ms is a frame boundary, so later frames sample exact offsets
        frames.advance(&clock, ms(496));
        assert_eq!(counter.phase(), CountUpPhase::NotStarted);
        assert_eq!(counter.value(), 0.0);

        let start = clock.now();
        visible.set(true);
        assert_eq!(counter.phase(), CountUpPhase::Running { started_at: start });

        frames.advance(&clock, ms(800));
        assert!((counter.value() - 875.0).abs() < 1e-9);

        frames.advance(&clock, ms(800));
        assert_eq!(counter.value(), 1000.0);
        assert!(counter.is_finished());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_count_up_starts_once() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let counter =
            CountUpAnimator::new(500.0, &visible, frames.clone(), CountUpOptions::default());
        let started = counter.phase();

        frames.advance(&clock, ms(400));
        let before = counter.value();
        assert!(before > 0.0);

        visible.set(false);
        visible.set(true);
        assert_eq!(counter.phase(), started);
        assert_eq!(counter.value(), before);

        frames.advance(&clock, ms(400));
        assert!(counter.value() > before);
        assert_eq!(visible.subscriber_count(), 0);
    }

    #[test]
    fn test_count_up_zero_and_negative_duration() {
        for d in [0, -250] {
            let (frames, _clock) = FrameLoop::manual();
            let visible = signal(true);
            let counter = CountUpAnimator::new(
                42.5,
                &visible,
                frames.clone(),
                CountUpOptions::duration_ms(d).decimals(1),
            );
            assert_eq!(counter.value(), 42.5);
            assert!(counter.is_finished());
            assert_eq!(frames.pending(), 0);
            assert_eq!(counter.decimals(), 1);
        }
    }

    #[test]
    fn test_count_up_zero_target_stays_zero() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let counter = CountUpAnimator::new(0.0, &visible, frames.clone(), CountUpOptions::default());
        let values = Rc::new(RefCell::new(Vec::new()));
        counter.value_signal().subscribe({
            let values = values.clone();
            move |v| values.borrow_mut().push(*v)
        });
        frames.advance(&clock, ms(2000));
        assert!(counter.is_finished());
        assert!(!values.borrow().is_empty());
        assert!(values.borrow().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_count_up_counts_down_from_start() {
        let mut c = CountUp::new(10.0, CountUpOptions::duration_ms(100).starting_from(50.0));
        let t0 = Instant::now();
        assert!(c.start(t0));
        assert!(!c.start(t0 + ms(10)));
        let mut prev = c.sample(t0);
        assert_eq!(prev, 50.0);
        for step in 1..=10 {
            let v = c.sample(t0 + ms(step * 10));
            assert!(v <= prev);
            prev = v;
        }
        assert_eq!(prev, 10.0);
    }

    #[test]
    fn test_count_up_teardown_stops_writes() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let counter =
            CountUpAnimator::new(1000.0, &visible, frames.clone(), CountUpOptions::default());
        frames.advance(&clock, ms(500));
        let writes = counter.writes();
        let value = counter.value();
        assert!(frames.pending() > 0);

        counter.dispose();
        assert_eq!(frames.pending(), 0);
        frames.advance(&clock, ms(3000));
        assert_eq!(counter.writes(), writes);
        assert_eq!(counter.value(), value);
    }

    #[test]
    fn test_late_frame_after_teardown_is_noop() {
        let (frames, clock) = FrameLoop::manual();
        let scheduler: Rc<dyn FrameScheduler> = Rc::new(NoCancel(frames.clone()));
        let visible = signal(true);
        let counter = CountUpAnimator::new(1000.0, &visible, scheduler, CountUpOptions::default());
        frames.advance(&clock, ms(100));
        let writes = counter.writes();

        counter.dispose();
        assert!(frames.pending() > 0, "frame should still be queued");
        frames.advance(&clock, ms(3000));
        assert_eq!(counter.writes(), writes);
    }

    #[test]
    fn test_count_up_dropped_mid_animation() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let counter =
            CountUpAnimator::new(1000.0, &visible, frames.clone(), CountUpOptions::default());
        let sink = counter.value_signal();
        frames.advance(&clock, ms(200));
        let last = sink.get();
        drop(counter);
        frames.advance(&clock, ms(2000));
        assert_eq!(sink.get(), last);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_stagger_concrete_schedule() {
        let root = RevealNode::group("timeline", 80, 100)
            .children((0..5).map(|i| RevealNode::new(format!("item-{i}"))));
        let plan = schedule(&root);
        let delays: Vec<u128> = plan[1..].iter().map(|p| p.delay.as_millis()).collect();
        assert_eq!(delays, vec![100, 180, 260, 340, 420]);
        assert_eq!(plan[0].delay, Duration::ZERO);
        assert!(plan[1..].iter().all(|p| p.parent == Some(0) && p.depth == 1));
    }

    #[test]
    fn test_nested_stagger_is_additive() {
        let root = RevealNode::group("root", 50, 200)
            .child(
                RevealNode::group("grid", 30, 10)
                    .children((0..3).map(|i| RevealNode::new(format!("card-{i}")))),
            )
            .child(RevealNode::new("footer").delay_ms(5));
        let plan = schedule(&root);
        let by_key = |k: &str| {
            plan.iter()
                .find(|p| p.key == k)
                .map(|p| p.delay.as_millis())
                .unwrap()
        };
        assert_eq!(by_key("grid"), 200);
        assert_eq!(by_key("card-0"), 210);
        assert_eq!(by_key("card-1"), 240);
        assert_eq!(by_key("card-2"), 270);
        assert_eq!(by_key("footer"), 255);
        // children never start before their parent
        for p in &plan {
            if let Some(parent) = p.parent {
                assert!(p.delay >= plan[parent].delay);
            }
        }
    }

    #[test]
    fn test_choreographer_fires_in_order() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(false);
        let root = RevealNode::group("list", 80, 100).children(
            (0..5).map(|i| RevealNode::new(format!("item-{i}")).motion(Motion::fade_up(16.0))),
        );
        let choreo = RevealChoreographer::new(root, &visible, frames.clone());
        assert_eq!(choreo.phase("item-0"), Some(RevealPhase::Hidden));

        let order = Rc::new(RefCell::new(Vec::new()));
        for key in choreo.keys() {
            let order = order.clone();
            let name = key.clone();
            choreo.phase_signal(&key).unwrap().subscribe(move |p| {
                if p.is_visible() {
                    order.borrow_mut().push(name.clone());
                }
            });
        }

        let t0 = clock.now();
        visible.set(true);
        assert_eq!(
            choreo.phase("item-2"),
            Some(RevealPhase::Pending {
                fire_at: t0 + ms(260)
            })
        );
        assert_eq!(choreo.pose("item-2", t0), Motion::fade_up(16.0).hidden);

        frames.advance(&clock, ms(100));
        assert!(choreo.is_revealed("item-0"));
        assert!(!choreo.is_revealed("item-1"));

        frames.advance(&clock, ms(320));
        assert!(choreo.keys().iter().all(|k| choreo.is_revealed(k)));
        assert_eq!(
            *order.borrow(),
            vec!["list", "item-0", "item-1", "item-2", "item-3", "item-4"]
        );

        let t_end = clock.now() + ms(600);
        assert_eq!(choreo.pose("item-4", t_end), Pose::REST);
        assert!(choreo.is_settled(t_end));
    }

    #[test]
    fn test_choreographer_pose_midway() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let node = RevealNode::new("card")
            .motion(Motion::fade_up(20.0))
            .transition(AnimationSpec::tween(ms(400), Easing::Linear));
        let choreo = RevealChoreographer::new(node, &visible, frames.clone());
        frames.pump();
        let pose = choreo.pose("card", clock.now() + ms(100));
        assert!((pose.opacity - 0.25).abs() < 1e-6);
        assert!((pose.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_choreographer_resets_and_replays() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let root = RevealNode::group("hero", 100, 150)
            .children((0..4).map(|i| RevealNode::new(format!("line-{i}"))));
        let choreo = RevealChoreographer::new(root, &visible, frames.clone());

        frames.advance(&clock, ms(260));
        assert!(choreo.is_revealed("line-1"));
        assert!(!choreo.is_revealed("line-2"));

        visible.set(false);
        assert_eq!(frames.pending(), 0);
        assert!(choreo.keys().iter().all(|k| choreo.phase(k) == Some(RevealPhase::Hidden)));

        frames.advance(&clock, ms(1000));
        assert!(!choreo.is_revealed("line-3"));

        let t1 = clock.now();
        visible.set(true);
        assert_eq!(choreo.activations(), 2);
        assert_eq!(
            choreo.phase("line-0"),
            Some(RevealPhase::Pending {
                fire_at: t1 + ms(150)
            })
        );
        frames.advance(&clock, ms(450));
        assert!(choreo.keys().iter().all(|k| choreo.is_revealed(k)));
    }

    #[test]
    fn test_choreographer_teardown_stops_writes() {
        let (frames, clock) = FrameLoop::manual();
        let visible = signal(true);
        let scope = Scope::new();
        let choreo = scope.run(|| {
            RevealChoreographer::new(
                RevealNode::group("grid", 100, 0)
                    .children((0..6).map(|i| RevealNode::new(format!("cell-{i}")))),
                &visible,
                frames.clone(),
            )
        });
        frames.advance(&clock, ms(150));
        let writes = choreo.writes();
        let phases: Vec<_> = choreo.keys().iter().map(|k| choreo.phase(k)).collect();

        scope.dispose();
        assert!(choreo.is_disposed());
        assert_eq!(frames.pending(), 0);
        frames.advance(&clock, ms(2000));
        visible.set(false);
        visible.set(true);
        assert_eq!(choreo.writes(), writes);
        let after: Vec<_> = choreo.keys().iter().map(|k| choreo.phase(k)).collect();
        assert_eq!(after, phases);
    }

    #[test]
    fn test_tracker_latches_once() {
        let (vp, obs) = viewport(400.0);
        let el = ElementId::fresh();
        vp.set_layout(el, Rect::new(0.0, 800.0, 1280.0, 200.0));
        let tracker = VisibilityTracker::observe(&obs, el, VisibilityOptions::amount(0.1).once());
        assert!(!tracker.is_visible());

        let reports = Rc::new(RefCell::new(Vec::new()));
        tracker.signal().subscribe({
            let reports = reports.clone();
            move |v| reports.borrow_mut().push(*v)
        });

        vp.scroll_to(600.0);
        assert!(tracker.is_visible());
        assert!(tracker.is_latched());
        assert_eq!(vp.observation_count(), 0);

        vp.scroll_to(0.0);
        vp.scroll_to(700.0);
        vp.scroll_to(0.0);
        assert!(tracker.is_visible());
        assert_eq!(*reports.borrow(), vec![true]);
        assert_eq!(tracker.flips(), 1);
    }

    #[test]
    fn test_tracker_repeats_without_latch() {
        let (vp, obs) = viewport(400.0);
        let el = ElementId::fresh();
        vp.set_layout(el, Rect::new(0.0, 500.0, 1280.0, 100.0));
        let tracker = VisibilityTracker::observe(&obs, el, VisibilityOptions::amount(0.5));

        vp.scroll_to(140.0);
        assert!(!tracker.is_visible(), "40% is below threshold");
        vp.scroll_to(150.0);
        assert!(tracker.is_visible());
        vp.scroll_to(0.0);
        assert!(!tracker.is_visible());
        vp.scroll_to(300.0);
        assert!(tracker.is_visible());
        assert_eq!(tracker.flips(), 3);
    }

    #[test]
    fn test_tracker_visible_on_mount_and_unlaid_elements() {
        let (vp, obs) = viewport(800.0);
        let on_screen = ElementId::fresh();
        vp.set_layout(on_screen, Rect::new(0.0, 0.0, 1280.0, 400.0));
        let a = VisibilityTracker::observe(&obs, on_screen, VisibilityOptions::amount(0.2).once());
        assert!(a.is_visible());
        assert_eq!(vp.observation_count(), 0);

        let missing = ElementId::fresh();
        let b = VisibilityTracker::observe(&obs, missing, VisibilityOptions::default());
        assert!(!b.is_visible());
        vp.set_layout(missing, Rect::new(0.0, 100.0, 1280.0, 10.0));
        assert!(b.is_visible());
    }

    #[test]
    fn test_tracker_dispose_unobserves() {
        let (vp, obs) = viewport(400.0);
        let el = ElementId::fresh();
        vp.set_layout(el, Rect::new(0.0, 1000.0, 1280.0, 100.0));
        let scope = Scope::new();
        let tracker = scope.run(|| VisibilityTracker::observe(&obs, el, VisibilityOptions::default()));
        assert_eq!(vp.observation_count(), 1);
        scope.dispose();
        assert!(tracker.is_disposed());
        assert_eq!(vp.observation_count(), 0);
        vp.scroll_to(1000.0);
        assert!(!tracker.is_visible());
    }

    #[test]
    fn test_dropping_tracker_unobserves() {
        let (vp, obs) = viewport(400.0);
        let el = ElementId::fresh();
        vp.set_layout(el, Rect::new(0.0, 1000.0, 1280.0, 100.0));
        let tracker = VisibilityTracker::observe(&obs, el, VisibilityOptions::default());
        let visible = tracker.signal();
        assert_eq!(vp.observation_count(), 1);

        drop(tracker);
        assert_eq!(vp.observation_count(), 0);
        vp.scroll_to(1000.0);
        assert!(!visible.get());
    }

    #[test]
    fn test_grow_x_fills_horizontally() {
        let m = Motion::grow_x();
        assert_eq!(m.hidden.scale_x, 0.0);
        assert_eq!(m.hidden.opacity, 1.0);
        assert_eq!(m.hidden.scale_y, 1.0);
        assert_eq!(m.at(0.5).scale_x, 0.5);
        assert!(m.at(1.0).is_rest());
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(VisibilityOptions::amount(1.5).threshold, 1.0);
        assert_eq!(VisibilityOptions::amount(-0.5).threshold, 0.0);
        let any = VisibilityOptions::default();
        assert!(any.satisfied_by(0.01, true));
        assert!(!any.satisfied_by(0.0, false));
    }

    proptest! {
        #[test]
        fn prop_count_up_converges_monotonically(
            target in 1.0f64..1_000_000.0,
            duration_ms in 1u64..5_000,
            samples in proptest::collection::vec(0u64..6_000, 1..40),
        ) {
            let mut samples = samples;
            samples.sort_unstable();
            let mut c = CountUp::new(target, CountUpOptions::duration_ms(duration_ms as i64));
            let t0 = Instant::now();
            c.start(t0);
            let mut prev = 0.0;
            for s in samples {
                let v = c.sample(t0 + Duration::from_millis(s));
                prop_assert!(v >= prev);
                prop_assert!(v <= target);
                if s >= duration_ms {
                    prop_assert_eq!(v, target);
                }
                prev = v;
            }
            prop_assert_eq!(c.sample(t0 + Duration::from_millis(duration_ms)), target);
        }

        #[test]
        fn prop_stagger_delays_are_linear(
            n in 1usize..20,
            stagger in 1u64..500,
            delay in 0u64..500,
            extra in 0u64..100,
        ) {
            let root = RevealNode::group("root", stagger, delay)
                .children((0..n).map(|i| RevealNode::new(format!("c{i}")).delay_ms(extra)));
            let plan = schedule(&root);
            for (i, p) in plan[1..].iter().enumerate() {
                let expected = delay + i as u64 * stagger + extra;
                prop_assert_eq!(p.delay, Duration::from_millis(expected));
            }
            for w in plan[1..].windows(2) {
                prop_assert!(w[1].delay > w[0].delay);
            }
        }
    }
}
