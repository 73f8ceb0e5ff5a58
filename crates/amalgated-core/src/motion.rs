//! Hidden/visible pose pairs for entrance animations.

use crate::animation::Interpolate;

/// Visual state of one animated element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Horizontal-only scale, used for filling bars.
    pub scale_x: f32,
    /// Vertical-only scale, used for growing tracks and accent rules.
    pub scale_y: f32,
}

impl Pose {
    pub const REST: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale_x(mut self, scale_x: f32) -> Self {
        self.scale_x = scale_x;
        self
    }

    pub fn scale_y(mut self, scale_y: f32) -> Self {
        self.scale_y = scale_y;
        self
    }

    pub fn is_rest(&self) -> bool {
        *self == Pose::REST
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::REST
    }
}

impl Interpolate for Pose {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Pose {
            opacity: self.opacity.interpolate(&other.opacity, t),
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
            scale: self.scale.interpolate(&other.scale, t),
            scale_x: self.scale_x.interpolate(&other.scale_x, t),
            scale_y: self.scale_y.interpolate(&other.scale_y, t),
        }
    }
}

/// The two endpoints an element animates between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub hidden: Pose,
    pub visible: Pose,
}

impl Default for Motion {
    fn default() -> Self {
        Motion::none()
    }
}

impl Motion {
    pub fn new(hidden: Pose, visible: Pose) -> Self {
        Self { hidden, visible }
    }

    /// Orchestration-only node: nothing moves.
    pub fn none() -> Self {
        Self::new(Pose::REST, Pose::REST)
    }

    pub fn fade_in() -> Self {
        Self::new(Pose::REST.opacity(0.0), Pose::REST)
    }

    /// Fades in while rising `dy` px.
    pub fn fade_up(dy: f32) -> Self {
        Self::new(Pose::REST.opacity(0.0).offset(0.0, dy), Pose::REST)
    }

    /// Fades in while sliding from `dx` px to the side.
    pub fn slide_x(dx: f32) -> Self {
        Self::new(Pose::REST.opacity(0.0).offset(dx, 0.0), Pose::REST)
    }

    /// Fades in while growing from `from` scale.
    pub fn zoom_in(from: f32) -> Self {
        Self::new(Pose::REST.opacity(0.0).scale(from), Pose::REST)
    }

    /// Scale 0 to 1, no fade.
    pub fn pop() -> Self {
        Self::new(Pose::REST.scale(0.0), Pose::REST)
    }

    /// Vertical growth from nothing (track fills, accent rules).
    pub fn grow_y() -> Self {
        Self::new(Pose::REST.scale_y(0.0), Pose::REST)
    }

    /// Horizontal fill from nothing; bars read `scale_x` as their share drawn so far.
    pub fn grow_x() -> Self {
        Self::new(Pose::REST.scale_x(0.0), Pose::REST)
    }

    pub fn at(&self, progress: f64) -> Pose {
        // finished transitions land exactly on the visible pose; springs may
        // overshoot past 1.0 before that
        if progress == 1.0 {
            return self.visible;
        }
        self.hidden.interpolate(&self.visible, progress)
    }
}
