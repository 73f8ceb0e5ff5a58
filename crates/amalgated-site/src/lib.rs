#![allow(non_snake_case)]
//! The Amalgated Group one-page site: content, sections and the page that
//! stacks them.
//!
//! Sections are mounted once against a viewport and a frame scheduler, then
//! sampled into a [`View`] tree whenever a frame is drawn:
//!
//! ```rust
//! use amalgated_core::{Clock, FrameLoop};
//! use amalgated_site::{Page, PageOptions};
//! use web_time::Duration;
//!
//! let options = PageOptions::default();
//! let (frames, clock) = FrameLoop::manual();
//! let page = Page::mount(&options, options.load_assets().unwrap(), frames.clone());
//!
//! page.scroll_to_anchor("#performance-metrics").unwrap();
//! frames.advance(&clock, Duration::from_secs(3));
//!
//! let view = page.frame(clock.now());
//! let metrics = view.find_section("performance-metrics").unwrap();
//! assert!(metrics.texts().contains(&"88%"));
//! ```

pub mod assets;
pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod page;
pub mod sections;
pub mod view;

pub use assets::AssetRegistry;
pub use config::PageOptions;
pub use error::{Result, SiteError};
pub use format::{CountFormat, Grouping};
pub use page::{Page, SectionStack};
pub use sections::{ElementHost, PageSection, SectionCtx, SectionKind};
pub use view::{TextStyle, View, ViewKind};
