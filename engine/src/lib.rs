//! Core engine for Snapdeck - section tracking and scroll arbitration.
//!
//! This crate contains the App state machine without TUI dependencies. The
//! renderer measures the document and feeds it in through
//! [`App::set_layout`]; input is delivered as [`NavAction`]s, clicks and
//! free-scroll deltas; [`App::tick`] advances animation, visibility and timers.

mod app;
mod arbiter;
mod container;
mod navigation;
mod observer;
mod scheduler;

pub use app::App;
pub use arbiter::{ArbiterConfig, DEFAULT_SUPPRESS_WINDOW, ScrollArbiter, ScrollDriver};
pub use container::{ContainerOptions, DocumentLayout, ScrollContainer};
pub use navigation::{Indicator, NavAction, NavButtons, indicators};
pub use observer::{
    DEFAULT_THRESHOLD, DEFAULT_TOP_MARGIN, Extent, IntersectionObserver, ObserverOptions,
    ViewportObserver, ViewportRect, VisibilityChange, dispatch_visibility,
};
pub use scheduler::{Scheduler, TimerId, TimerQueue};

// Re-export from crates for public API
pub use snapdeck_config::{ConfigError, ScrollSettings, SnapdeckConfig};
pub use snapdeck_types::{
    Card, Hue, RegistryError, ScrollState, Section, SectionId, SectionRegistry, ThemeTag,
    sanitize_terminal_text, ui,
};
