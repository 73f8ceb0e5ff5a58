pub use crate::animation::{AnimationSpec, Clock, Easing, SystemClock, TestClock};
pub use crate::count_up::{CountUpAnimator, CountUpOptions, CountUpPhase};
pub use crate::frame::{FrameLoop, FrameScheduler, TaskId};
pub use crate::geometry::{Rect, Vec2};
pub use crate::motion::{Motion, Pose};
pub use crate::reveal::{RevealChoreographer, RevealNode, RevealPhase, Stagger};
pub use crate::scope::{Scope, current_scope};
pub use crate::signal::{Signal, signal};
pub use crate::visibility::{
    ElementId, ScrollViewport, ViewportObserver, VisibilityOptions, VisibilityTracker,
};
