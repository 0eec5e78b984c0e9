//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;
mod view_state;

pub use animation::{AnimPhase, EffectTimer, ease_in_out_cubic};
pub use view_state::{ClickTarget, HitRegion, UiOptions, ViewState};
