//! Scroll arbitration: one authoritative active-section index fed by two
//! competing sources.
//!
//! Visibility reports arrive whenever a section crosses the in-view
//! threshold. Navigation requests (keys, dots, buttons) set the index
//! immediately and start a smooth scroll that sweeps past intermediate
//! sections. Those intermediate reports must not overwrite the destination,
//! so every navigation opens a suppression window during which reports are
//! ignored. A newer navigation restarts the window (debounce): exactly one
//! reset timer is outstanding at any time.
//!
//! ```text
//!   ViewportObserver ──report_in_view──▶ ScrollArbiter ◀──navigate_to── NavigationSurface
//!                                            │
//!                          ScrollDriver ◀────┴────▶ Scheduler (suppression reset)
//! ```

use std::time::Duration;

use tracing::debug;

use snapdeck_types::{ScrollState, SectionId};

use crate::scheduler::{Scheduler, TimerId};

pub const DEFAULT_SUPPRESS_WINDOW: Duration = Duration::from_millis(1000);

/// Host capability that brings a section into view.
///
/// Requests for ids the host doesn't know are dropped silently; the arbiter has
/// already committed the new index by the time the request is issued.
pub trait ScrollDriver {
    fn scroll_into_view(&mut self, id: &SectionId);
}

impl<D: ScrollDriver + ?Sized> ScrollDriver for &mut D {
    fn scroll_into_view(&mut self, id: &SectionId) {
        (**self).scroll_into_view(id);
    }
}

/// Queue driver: requests are collected and applied by the owner later in the same turn.
impl ScrollDriver for Vec<SectionId> {
    fn scroll_into_view(&mut self, id: &SectionId) {
        self.push(id.clone());
    }
}

#[derive(Debug, Clone)]
pub struct ArbiterConfig {
    /// Section ids in navigation order.
    pub section_ids: Vec<SectionId>,
    pub suppress_window: Duration,
}

impl ArbiterConfig {
    #[must_use]
    pub fn new(section_ids: Vec<SectionId>) -> Self {
        Self {
            section_ids,
            suppress_window: DEFAULT_SUPPRESS_WINDOW,
        }
    }

    #[must_use]
    pub fn with_suppress_window(mut self, window: Duration) -> Self {
        self.suppress_window = window;
        self
    }
}

/// Owns the [`ScrollState`]; the only writer of `active_index`.
///
/// Indices passed to [`report_in_view`](Self::report_in_view) and
/// [`navigate_to`](Self::navigate_to) must already be validated by the caller.
/// An out-of-range index is a bug and panics.
pub struct ScrollArbiter<S: Scheduler, D: ScrollDriver> {
    section_ids: Vec<SectionId>,
    suppress_window: Duration,
    state: ScrollState,
    pending_reset: Option<TimerId>,
    scheduler: S,
    driver: D,
}

impl<S: Scheduler, D: ScrollDriver> ScrollArbiter<S, D> {
    #[must_use]
    pub fn new(config: ArbiterConfig, scheduler: S, driver: D) -> Self {
        assert!(
            !config.section_ids.is_empty(),
            "scroll arbiter needs at least one section"
        );
        Self {
            section_ids: config.section_ids,
            suppress_window: config.suppress_window,
            state: ScrollState::new(),
            pending_reset: None,
            scheduler,
            driver,
        }
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    #[must_use]
    pub fn is_programmatic_scroll(&self) -> bool {
        self.state.is_programmatic_scroll
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.section_ids.len()
    }

    #[must_use]
    pub fn suppress_window(&self) -> Duration {
        self.suppress_window
    }

    /// The outstanding suppression-reset timer, if a window is open.
    #[must_use]
    pub fn pending_reset(&self) -> Option<TimerId> {
        self.pending_reset
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn check_index(&self, index: usize, op: &str) {
        assert!(
            index < self.section_ids.len(),
            "{op}: section index {index} out of range (section count {})",
            self.section_ids.len()
        );
    }

    /// Section `index` became visible. Ignored while a programmatic scroll is in flight.
    ///
    /// Returns whether the active index changed.
    pub fn report_in_view(&mut self, index: usize) -> bool {
        self.check_index(index, "report_in_view");
        if self.state.is_programmatic_scroll {
            debug!(index, "Visibility report suppressed during programmatic scroll");
            return false;
        }
        let changed = self.state.active_index != index;
        self.state.active_index = index;
        if changed {
            debug!(index, "Active section updated from viewport");
        }
        changed
    }

    /// Make `index` the active section and scroll it into view.
    pub fn navigate_to(&mut self, index: usize) {
        self.check_index(index, "navigate_to");

        self.state.is_programmatic_scroll = true;
        if let Some(previous) = self.pending_reset.take() {
            self.scheduler.cancel(previous);
        }
        self.state.active_index = index;
        self.driver.scroll_into_view(&self.section_ids[index]);
        self.pending_reset = Some(self.scheduler.schedule(self.suppress_window));

        debug!(
            index,
            id = %self.section_ids[index],
            window_ms = self.suppress_window.as_millis() as u64,
            "Programmatic scroll started"
        );
    }

    /// Drive the scheduler to `now`. Returns `true` if suppression was released.
    pub fn poll_timers(&mut self, now: Duration) -> bool {
        let mut released = false;
        for id in self.scheduler.poll_expired(now) {
            if self.pending_reset == Some(id) {
                self.pending_reset = None;
                self.state.is_programmatic_scroll = false;
                released = true;
                debug!(
                    active = self.state.active_index,
                    "Suppression window elapsed; following the viewport again"
                );
            }
        }
        released
    }
}

impl<S: Scheduler, D: ScrollDriver> Drop for ScrollArbiter<S, D> {
    fn drop(&mut self) {
        if let Some(id) = self.pending_reset.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl<S: Scheduler, D: ScrollDriver> std::fmt::Debug for ScrollArbiter<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollArbiter")
            .field("sections", &self.section_ids.len())
            .field("suppress_window", &self.suppress_window)
            .field("state", &self.state)
            .field("pending_reset", &self.pending_reset)
            .finish_non_exhaustive()
    }
}
