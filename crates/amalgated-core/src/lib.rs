//! # Signals, scopes, and entrance animations
//!
//! `amalgated-core` holds the small reactive runtime the site is built on and
//! the three animation primitives every section reuses.
//!
//! - `Signal<T>`: observable value with explicit subscriptions.
//! - `Scope`: owner of teardown work; disposing it cancels everything mounted
//!   inside.
//! - `FrameScheduler`: "call me next frame / at this instant", with
//!   cancellation. `FrameLoop` implements it over an injected `Clock`.
//! - `VisibilityTracker`: boolean "on screen" signal fed by a
//!   `ViewportObserver`.
//! - `CountUpAnimator`: eases a number from its start to a target once its
//!   visibility signal first turns true.
//! - `RevealChoreographer`: staggered hidden → visible transitions over a tree
//!   of nodes.
//!
//! ## Driving time by hand
//!
//! Everything reads time through the scheduler, so tests step a `TestClock`
//! instead of sleeping:
//!
//! ```rust
//! use amalgated_core::*;
//! use web_time::Duration;
//!
//! let (frames, clock) = FrameLoop::manual();
//! let visible = signal(false);
//! let counter = CountUpAnimator::new(
//!     1000.0,
//!     &visible,
//!     frames.clone(),
//!     CountUpOptions::default(),
//! );
//!
//! visible.set(true);
//! frames.advance(&clock, Duration::from_millis(1600));
//! assert_eq!(counter.value(), 1000.0);
//! ```
//!
//! ## Teardown
//!
//! Animators created while a `Scope` is running register a disposer with it:
//!
//! ```rust
//! use amalgated_core::*;
//!
//! let (frames, clock) = FrameLoop::manual();
//! let scope = Scope::new();
//! let visible = signal(true);
//! let counter = scope.run(|| {
//!     CountUpAnimator::new(5.0, &visible, frames.clone(), CountUpOptions::default())
//! });
//! scope.dispose();
//! assert!(counter.is_disposed());
//! assert_eq!(frames.pending(), 0);
//! # let _ = clock;
//! ```

pub mod animation;
pub mod count_up;
pub mod frame;
pub mod geometry;
pub mod motion;
pub mod prelude;
pub mod reveal;
pub mod scope;
pub mod signal;
pub mod tests;
pub mod visibility;

pub use animation::*;
pub use count_up::*;
pub use frame::*;
pub use geometry::*;
pub use motion::*;
pub use reveal::*;
pub use scope::*;
pub use signal::*;
pub use visibility::*;
