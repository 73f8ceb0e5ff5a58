//! Runners for the Amalgated page.
//!
//! - [`headless`]: mounts the page over a geometric viewport and scrolls it
//!   on a script, reporting when each section came into view.
//! - [`paint`]: the style and text writes a DOM renderer makes per frame.
//! - `web` (wasm32 only): mounts the same sections against the live document,
//!   with `IntersectionObserver` for visibility and `requestAnimationFrame` /
//!   `setTimeout` for scheduling.

use thiserror::Error;

use amalgated_site::SiteError;

pub mod headless;
pub mod paint;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::run_headless;
pub use headless::{RunReport, ScrollScript, run_headless_with};
pub use paint::{Patch, patches};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    Site(#[from] SiteError),

    #[error("scroll speed must be positive, got {0} px/s")]
    InvalidSpeed(f32),

    #[error("no browser window")]
    NoWindow,

    #[error("browser call failed: {0}")]
    Js(String),
}

pub type Result<T, E = PlatformError> = std::result::Result<T, E>;
