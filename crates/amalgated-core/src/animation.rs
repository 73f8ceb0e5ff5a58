use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    /// `1 - (1 - t)^3`
    EaseOutCubic,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
    /// Damped spring with unit mass, normalised over its settle time.
    Spring { stiffness: f64, damping: f64 },
}

impl Easing {
    /// The page's default entrance curve.
    pub const OUT_EXPO_LIKE: Easing = Easing::CubicBezier(0.22, 1.0, 0.36, 1.0);

    pub fn interpolate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
            Easing::Spring { stiffness, damping } => {
                if t >= 1.0 {
                    return 1.0;
                }
                let tau = t * spring_settle_secs(stiffness, damping);
                spring_position(stiffness, damping, tau)
            }
        }
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Polynomial coefficients for P0 = (0,0), P3 = (1,1).
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let slope = |t: f64| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton first, bisection when the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let err = sample(ax, bx, cx, t) - x;
        if err.abs() < 1e-7 {
            return sample(ay, by, cy, t);
        }
        let d = slope(t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    t = x;
    for _ in 0..64 {
        let v = sample(ax, bx, cx, t);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    sample(ay, by, cy, t)
}

/// Time for the spring envelope to decay below 0.1%.
pub fn spring_settle_secs(stiffness: f64, damping: f64) -> f64 {
    let stiffness = stiffness.max(1e-3);
    let damping = damping.max(1e-3);
    let omega0 = stiffness.sqrt();
    let zeta = damping / (2.0 * omega0);
    let decay = if zeta < 1.0 { zeta * omega0 } else { omega0 };
    (1000.0f64).ln() / decay.max(1e-3)
}

fn spring_position(stiffness: f64, damping: f64, tau: f64) -> f64 {
    let stiffness = stiffness.max(1e-3);
    let damping = damping.max(1e-3);
    let omega0 = stiffness.sqrt();
    let zeta = damping / (2.0 * omega0);
    if zeta < 1.0 {
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * tau).exp();
        1.0 - envelope * ((omega_d * tau).cos() + (zeta * omega0 / omega_d) * (omega_d * tau).sin())
    } else {
        // critically damped (overdamped springs are treated the same)
        1.0 - (-omega0 * tau).exp() * (1.0 + omega0 * tau)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    /// Tween with the page's default curve, in milliseconds.
    pub fn out_ms(duration_ms: u64) -> Self {
        Self::tween(Duration::from_millis(duration_ms), Easing::OUT_EXPO_LIKE)
    }

    /// Spring whose duration is its settle time.
    pub fn spring(stiffness: f64, damping: f64) -> Self {
        Self {
            duration: Duration::from_secs_f64(spring_settle_secs(stiffness, damping)),
            easing: Easing::Spring { stiffness, damping },
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_delay_ms(self, delay_ms: u64) -> Self {
        self.with_delay(Duration::from_millis(delay_ms))
    }

    /// Eased progress `elapsed` after the transition began (delay not included).
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.easing.interpolate(t)
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you can drive deterministically. Clones share the same time.
#[derive(Clone, Debug)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(t: Instant) -> Self {
        Self {
            t: Rc::new(Cell::new(t)),
        }
    }

    pub fn advance(&self, d: Duration) {
        self.t.set(self.t.get() + d);
    }

    /// Moves the clock to `t`; never moves it backwards.
    pub fn set(&self, t: Instant) {
        if t > self.t.get() {
            self.t.set(t);
        }
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}
