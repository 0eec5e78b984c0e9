//! The scrollable document: geometry, smooth scroll-into-view, and proximity snapping.
//!
//! Document rows are laid out top to bottom as header, sections, footer. The
//! header is sticky in the rendered view, so scroll targets leave
//! `header_height` rows of margin above a section's first row.

use std::time::Duration;

use tracing::debug;

use snapdeck_types::SectionId;
use snapdeck_types::ui::{AnimPhase, EffectTimer, ease_in_out_cubic};

use crate::observer::{Extent, ViewportRect};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentLayout {
    pub header_height: u16,
    /// Rendered height of each section, in document order.
    pub sections: Vec<(SectionId, u32)>,
    pub footer_height: u16,
    pub viewport_height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerOptions {
    pub smooth_scroll: Duration,
    /// Idle time after a user scroll before snapping is considered.
    pub snap_idle: Duration,
    /// Snap only when a section start is within this fraction of the viewport height.
    pub snap_proximity: f32,
    pub reduced_motion: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            smooth_scroll: Duration::from_millis(600),
            snap_idle: Duration::from_millis(150),
            snap_proximity: 0.25,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    /// Section being brought into view; `None` for snap settles.
    target: Option<SectionId>,
    timer: EffectTimer,
}

#[derive(Debug)]
pub struct ScrollContainer {
    options: ContainerOptions,
    layout: Option<DocumentLayout>,
    extents: Vec<Extent>,
    total_height: u32,
    offset: f32,
    animation: Option<ScrollAnimation>,
    /// Requested before the first layout; applied once geometry exists.
    deferred: Option<SectionId>,
    /// Time of the last user scroll that has not been settled yet.
    idle_since: Option<Duration>,
}

impl ScrollContainer {
    #[must_use]
    pub fn new(options: ContainerOptions) -> Self {
        Self {
            options,
            layout: None,
            extents: Vec::new(),
            total_height: 0,
            offset: 0.0,
            animation: None,
            deferred: None,
            idle_since: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> ContainerOptions {
        self.options
    }

    #[must_use]
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    #[must_use]
    pub fn layout(&self) -> Option<&DocumentLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    #[must_use]
    pub fn total_height(&self) -> u32 {
        self.total_height
    }

    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// First document row shown at the top of the viewport.
    #[must_use]
    pub fn row_offset(&self) -> u32 {
        self.offset.round() as u32
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportRect {
        ViewportRect {
            scroll_top: self.offset,
            height: self.viewport_height(),
        }
    }

    fn viewport_height(&self) -> u32 {
        self.layout
            .as_ref()
            .map_or(0, |layout| u32::from(layout.viewport_height))
    }

    #[must_use]
    pub fn max_offset(&self) -> f32 {
        self.total_height.saturating_sub(self.viewport_height()) as f32
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Offset that puts `id`'s first row just below the sticky header.
    #[must_use]
    pub fn scroll_target(&self, id: &SectionId) -> Option<f32> {
        let layout = self.layout.as_ref()?;
        let extent = self.extents.iter().find(|extent| &extent.id == id)?;
        let margin = u32::from(layout.header_height);
        Some((extent.top.saturating_sub(margin) as f32).min(self.max_offset()))
    }

    /// Replace the document geometry (resize, first frame, content change).
    pub fn set_layout(&mut self, layout: DocumentLayout) {
        if self.layout.as_ref() == Some(&layout) {
            return;
        }

        let mut top = u32::from(layout.header_height);
        self.extents = layout
            .sections
            .iter()
            .map(|(id, height)| {
                let extent = Extent {
                    id: id.clone(),
                    top,
                    height: *height,
                };
                top = top.saturating_add(*height);
                extent
            })
            .collect();
        self.total_height = top.saturating_add(u32::from(layout.footer_height));
        self.layout = Some(layout);

        let max = self.max_offset();
        self.offset = self.offset.clamp(0.0, max);

        if let Some(id) = self
            .animation
            .as_ref()
            .and_then(|animation| animation.target.clone())
        {
            match self.scroll_target(&id) {
                Some(to) => {
                    if let Some(animation) = self.animation.as_mut() {
                        animation.to = to;
                    }
                }
                None => self.animation = None,
            }
        } else if let Some(animation) = self.animation.as_mut() {
            animation.to = animation.to.clamp(0.0, max);
        }

        if let Some(id) = self.deferred.take() {
            self.scroll_into_view(&id);
        }
    }

    /// Bring `id` into view. Unknown ids are ignored.
    ///
    /// Returns `false` when the id is not part of the document.
    pub fn scroll_into_view(&mut self, id: &SectionId) -> bool {
        if self.layout.is_none() {
            self.deferred = Some(id.clone());
            return true;
        }
        let Some(to) = self.scroll_target(id) else {
            debug!(id = %id, "scroll_into_view for unknown section ignored");
            return false;
        };
        self.idle_since = None;
        self.start_scroll(to, Some(id.clone()));
        true
    }

    fn start_scroll(&mut self, to: f32, target: Option<SectionId>) {
        if self.options.reduced_motion || self.options.smooth_scroll.is_zero() {
            self.offset = to;
            self.animation = None;
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            to,
            target,
            timer: EffectTimer::new(self.options.smooth_scroll),
        });
    }

    /// User scroll by `rows`. Cancels any animation; snapping is considered once idle.
    pub fn scroll_by(&mut self, rows: f32, now: Duration) {
        self.animation = None;
        self.offset = (self.offset + rows).clamp(0.0, self.max_offset());
        self.idle_since = Some(now);
    }

    /// Advance animation and idle snapping. Returns whether the offset moved.
    pub fn tick(&mut self, delta: Duration, now: Duration) -> bool {
        let before = self.offset;

        if let Some(animation) = self.animation.as_mut() {
            animation.timer.advance(delta);
            match animation.timer.phase() {
                AnimPhase::Running { progress } => {
                    let eased = ease_in_out_cubic(progress);
                    self.offset = animation.from + (animation.to - animation.from) * eased;
                }
                AnimPhase::Completed => {
                    self.offset = animation.to;
                    if let Some(id) = &animation.target {
                        debug!(id = %id, "Smooth scroll finished");
                    }
                    self.animation = None;
                }
            }
        } else if let Some(since) = self.idle_since
            && now.saturating_sub(since) >= self.options.snap_idle
        {
            self.idle_since = None;
            if let Some(to) = self.snap_point() {
                debug!(from = self.offset, to, "Settling onto nearest section");
                self.start_scroll(to, None);
            }
        }

        (self.offset - before).abs() > f32::EPSILON
    }

    /// Nearest section start within snapping distance, if it differs from the current offset.
    fn snap_point(&self) -> Option<f32> {
        let layout = self.layout.as_ref()?;
        let reach = self.options.snap_proximity * f32::from(layout.viewport_height);
        if reach <= 0.0 {
            return None;
        }
        self.extents
            .iter()
            .filter_map(|extent| self.scroll_target(&extent.id))
            .map(|to| (to, (to - self.offset).abs()))
            .filter(|(_, distance)| *distance <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .and_then(|(to, distance)| (distance > f32::EPSILON).then_some(to))
    }
}
