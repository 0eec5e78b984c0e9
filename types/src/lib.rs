//! Core domain types for Snapdeck.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod registry;
mod sanitize;
mod section;
pub mod ui;

pub use registry::{RegistryError, SectionRegistry};
pub use sanitize::sanitize_terminal_text;
pub use section::{Card, Hue, Section, SectionId, SectionIdError, ThemeTag, ThemeTagError};

// ============================================================================
// ScrollState - the arbiter's authoritative view of "where the user is"
// ============================================================================

/// Which section the user is considered to be viewing, plus the transient
/// flag that suppresses observation while a programmatic scroll is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub active_index: usize,
    pub is_programmatic_scroll: bool,
}

impl ScrollState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active_index: 0,
            is_programmatic_scroll: false,
        }
    }
}
