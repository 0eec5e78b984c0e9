//! Viewport visibility tracking.
//!
//! The observer watches section extents against the scroll container's
//! viewport and queues a [`VisibilityChange`] whenever a section crosses the
//! in-view threshold. The app drains the queue once per tick and forwards
//! the entering sections to the arbiter.

use tracing::{debug, trace};

use snapdeck_types::{SectionId, SectionRegistry};

use crate::arbiter::{ScrollArbiter, ScrollDriver};
use crate::scheduler::Scheduler;

pub const DEFAULT_THRESHOLD: f32 = 0.1;
/// Matches the height of a typical sticky page header.
pub const DEFAULT_TOP_MARGIN: u16 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub id: SectionId,
    pub visible: bool,
}

/// Reports visibility transitions of observed sections.
pub trait ViewportObserver {
    fn observe(&mut self, id: SectionId);
    fn unobserve(&mut self, id: &SectionId);
    /// Drain transitions accumulated since the last call, oldest first.
    fn take_changes(&mut self) -> Vec<VisibilityChange>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Minimum fraction of a section's height inside the root area.
    pub threshold: f32,
    /// Rows at the top of the viewport excluded from the root area.
    pub top_margin: u16,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_margin: DEFAULT_TOP_MARGIN,
        }
    }
}

/// Where a section sits in document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extent {
    pub id: SectionId,
    pub top: u32,
    pub height: u32,
}

impl Extent {
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub scroll_top: f32,
    pub height: u32,
}

/// Geometry-driven observer: call [`update`](Self::update) after every layout or scroll change.
#[derive(Debug, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    observed: Vec<(SectionId, bool)>,
    queue: Vec<VisibilityChange>,
}

impl IntersectionObserver {
    #[must_use]
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
            queue: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn set_top_margin(&mut self, rows: u16) {
        self.options.top_margin = rows;
    }

    #[must_use]
    pub fn is_visible(&self, id: &SectionId) -> bool {
        self.observed
            .iter()
            .any(|(observed, visible)| observed == id && *visible)
    }

    /// Sections currently in view, in observation order.
    pub fn visible_ids(&self) -> impl Iterator<Item = &SectionId> {
        self.observed
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Fraction of `extent` inside the root area, in `[0, 1]`.
    ///
    /// The root spans `[scroll_top + top_margin, scroll_top + height)`.
    #[must_use]
    pub fn visible_ratio(&self, extent: &Extent, viewport: ViewportRect) -> f32 {
        if extent.height == 0 {
            return 0.0;
        }
        let root_top = viewport.scroll_top + f32::from(self.options.top_margin);
        let root_bottom = viewport.scroll_top + viewport.height as f32;
        let top = (extent.top as f32).max(root_top);
        let bottom = (extent.bottom() as f32).min(root_bottom);
        ((bottom - top).max(0.0) / extent.height as f32).min(1.0)
    }

    fn in_view(&self, extent: &Extent, viewport: ViewportRect) -> bool {
        let ratio = self.visible_ratio(extent, viewport);
        ratio > 0.0 && ratio >= self.options.threshold
    }

    /// Recompute visibility and queue a change for every observed section that flipped.
    ///
    /// Changes are queued in observation order. Observed sections with no
    /// extent are treated as not visible.
    pub fn update(&mut self, extents: &[Extent], viewport: ViewportRect) {
        let mut observed = std::mem::take(&mut self.observed);
        for (id, visible) in &mut observed {
            let now = extents
                .iter()
                .find(|extent| &extent.id == id)
                .is_some_and(|extent| self.in_view(extent, viewport));
            if now != *visible {
                trace!(id = %id, visible = now, "Section visibility changed");
                *visible = now;
                self.queue.push(VisibilityChange {
                    id: id.clone(),
                    visible: now,
                });
            }
        }
        self.observed = observed;
    }
}

impl ViewportObserver for IntersectionObserver {
    fn observe(&mut self, id: SectionId) {
        if self.observed.iter().any(|(observed, _)| observed == &id) {
            return;
        }
        self.observed.push((id, false));
    }

    fn unobserve(&mut self, id: &SectionId) {
        self.observed.retain(|(observed, _)| observed != id);
        self.queue.retain(|change| &change.id != id);
    }

    fn take_changes(&mut self) -> Vec<VisibilityChange> {
        std::mem::take(&mut self.queue)
    }
}

/// Forward sections that entered the viewport to the arbiter.
///
/// Unknown ids are skipped. Returns how many reports changed the active section.
pub fn dispatch_visibility<O, S, D>(
    observer: &mut O,
    arbiter: &mut ScrollArbiter<S, D>,
    registry: &SectionRegistry,
) -> usize
where
    O: ViewportObserver + ?Sized,
    S: Scheduler,
    D: ScrollDriver,
{
    let mut changed = 0;
    for change in observer.take_changes() {
        if !change.visible {
            continue;
        }
        let Some(index) = registry.position(&change.id) else {
            debug!(id = %change.id, "Visibility change for unknown section");
            continue;
        };
        if arbiter.report_in_view(index) {
            changed += 1;
        }
    }
    changed
}
