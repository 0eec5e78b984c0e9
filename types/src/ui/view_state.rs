//! View state for rendering.
//!
//! Groups what the renderer needs to remember between frames (options, the
//! clickable regions it laid out), separate from the scroll arbitration state.

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Jump instead of animating scroll-into-view.
    pub reduced_motion: bool,
}

/// What a mouse click on a region should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Position indicator for the section at this index.
    Dot(usize),
    PrevButton,
    NextButton,
}

/// Screen rectangle (terminal cells) that reacts to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub target: ClickTarget,
}

impl HitRegion {
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub ui_options: UiOptions,
    /// Clickable regions from the last drawn frame (later entries win).
    pub hit_regions: Vec<HitRegion>,
}

impl ViewState {
    #[must_use]
    pub fn new(ui_options: UiOptions) -> Self {
        Self {
            ui_options,
            hit_regions: Vec::new(),
        }
    }

    /// Topmost region under the cell, if any.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ClickTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.contains(column, row))
            .map(|region| region.target)
    }
}
