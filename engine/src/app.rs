//! The application state machine: wires the registry, observer, arbiter and
//! scroll container together and exposes the operations the TUI drives.

use std::time::{Duration, Instant};

use tracing::debug;

use snapdeck_config::{ScrollSettings, SnapdeckConfig};
use snapdeck_types::ui::{ClickTarget, UiOptions, ViewState};
use snapdeck_types::{RegistryError, ScrollState, SectionId, SectionRegistry};

use crate::arbiter::{ArbiterConfig, ScrollArbiter};
use crate::container::{ContainerOptions, DocumentLayout, ScrollContainer};
use crate::navigation::{Indicator, NavAction, NavButtons, indicators};
use crate::observer::{
    IntersectionObserver, ObserverOptions, ViewportObserver, dispatch_visibility,
};
use crate::scheduler::TimerQueue;

pub struct App {
    registry: SectionRegistry,
    /// Scroll requests are queued in the `Vec` driver and applied to `container`.
    arbiter: ScrollArbiter<TimerQueue, Vec<SectionId>>,
    observer: IntersectionObserver,
    container: ScrollContainer,
    settings: ScrollSettings,
    view: ViewState,
    time: TimeSource,
    /// Time of the latest tick.
    clock: Duration,
    should_quit: bool,
}

/// Where the app reads the current time from.
#[derive(Debug, Clone, Copy)]
enum TimeSource {
    /// Time since the app was created.
    Wall(Instant),
    /// Time moves only through [`App::tick_at`].
    Manual,
}

impl App {
    #[must_use]
    pub fn new(registry: SectionRegistry, settings: ScrollSettings, ui_options: UiOptions) -> Self {
        let arbiter = ScrollArbiter::new(
            ArbiterConfig::new(registry.ids()).with_suppress_window(settings.suppress_window),
            TimerQueue::new(),
            Vec::new(),
        );

        let mut observer = IntersectionObserver::new(ObserverOptions {
            threshold: settings.visibility_threshold,
            ..ObserverOptions::default()
        });
        for id in registry.ids() {
            observer.observe(id);
        }

        let container = ScrollContainer::new(ContainerOptions {
            smooth_scroll: settings.smooth_scroll,
            snap_idle: settings.snap_idle,
            snap_proximity: settings.snap_proximity,
            reduced_motion: ui_options.reduced_motion,
        });

        debug!(
            sections = registry.len(),
            suppress_window_ms = settings.suppress_window.as_millis() as u64,
            "App initialized"
        );

        Self {
            registry,
            arbiter,
            observer,
            container,
            settings,
            view: ViewState::new(ui_options),
            time: TimeSource::Wall(Instant::now()),
            clock: Duration::ZERO,
            should_quit: false,
        }
    }

    /// Stop reading the wall clock: time advances only through [`App::tick_at`].
    ///
    /// Replays and tests drive the app with exact timestamps this way.
    #[must_use]
    pub fn with_manual_clock(mut self) -> Self {
        self.time = TimeSource::Manual;
        self
    }

    /// Build from an optional loaded config; `None` gives the built-in deck with defaults.
    pub fn from_config(config: Option<&SnapdeckConfig>) -> Result<Self, RegistryError> {
        let Some(config) = config else {
            return Ok(Self::new(
                SectionRegistry::builtin(),
                ScrollSettings::default(),
                UiOptions::default(),
            ));
        };
        Ok(Self::new(
            config.registry()?,
            config.scroll_settings(),
            config.ui_options(),
        ))
    }

    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn settings(&self) -> &ScrollSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.arbiter.state()
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.arbiter.active_index()
    }

    #[must_use]
    pub fn is_programmatic_scroll(&self) -> bool {
        self.arbiter.is_programmatic_scroll()
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn container(&self) -> &ScrollContainer {
        &self.container
    }

    #[must_use]
    pub fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view.ui_options
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    fn now(&self) -> Duration {
        match self.time {
            TimeSource::Wall(started) => started.elapsed().max(self.clock),
            TimeSource::Manual => self.clock,
        }
    }

    /// When the current suppression window closes, if one is open.
    #[must_use]
    pub fn suppression_deadline(&self) -> Option<Duration> {
        let pending = self.arbiter.pending_reset()?;
        self.arbiter.scheduler().deadline(pending)
    }

    #[must_use]
    pub fn nav_buttons(&self) -> NavButtons {
        NavButtons::for_position(self.active_index(), self.section_count())
    }

    #[must_use]
    pub fn prev_enabled(&self) -> bool {
        self.nav_buttons().prev_enabled
    }

    #[must_use]
    pub fn next_enabled(&self) -> bool {
        self.nav_buttons().next_enabled
    }

    #[must_use]
    pub fn indicators(&self) -> Vec<Indicator> {
        indicators(self.active_index(), self.section_count())
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Resolve a navigation key or button. Returns `false` when it produced no transition.
    pub fn handle_nav(&mut self, action: NavAction) -> bool {
        match action.target(self.active_index(), self.section_count()) {
            Some(index) => {
                self.navigate_to(index);
                true
            }
            None => false,
        }
    }

    /// Jump to section `index` (dot click or resolved navigation).
    pub fn navigate_to(&mut self, index: usize) {
        // The window opens at the request, not at the previous tick.
        let now = self.now();
        self.poll_timers(now);
        self.arbiter.navigate_to(index);
        self.apply_scroll_requests();
    }

    fn apply_scroll_requests(&mut self) {
        for id in std::mem::take(self.arbiter.driver_mut()) {
            self.container.scroll_into_view(&id);
        }
    }

    /// Mouse click at a screen cell. Returns whether it hit something actionable.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        match self.view.hit_test(column, row) {
            Some(ClickTarget::Dot(index)) if index < self.section_count() => {
                self.navigate_to(index);
                true
            }
            Some(ClickTarget::PrevButton) => self.handle_nav(NavAction::Prev),
            Some(ClickTarget::NextButton) => self.handle_nav(NavAction::Next),
            Some(ClickTarget::Dot(_)) | None => false,
        }
    }

    /// Free scrolling (wheel, `j`/`k`). Positive rows scroll down.
    pub fn scroll_lines(&mut self, rows: i32) {
        self.container.scroll_by(rows as f32, self.clock);
        self.sync_visibility();
    }

    /// Feed freshly measured geometry from the renderer.
    pub fn set_layout(&mut self, layout: DocumentLayout) {
        let margin = self.settings.header_offset.unwrap_or(layout.header_height);
        self.observer.set_top_margin(margin);
        self.container.set_layout(layout);
        self.sync_visibility();
    }

    pub fn tick(&mut self) {
        let now = self.now();
        self.tick_at(now);
    }

    /// Advance to `now` (time since start): scroll animation, then visibility, then timers.
    pub fn tick_at(&mut self, now: Duration) {
        let delta = now.saturating_sub(self.clock);
        self.clock = self.clock.max(now);

        self.container.tick(delta, self.clock);
        self.sync_visibility();
        self.poll_timers(self.clock);
    }

    fn poll_timers(&mut self, now: Duration) {
        if self.arbiter.poll_timers(now) {
            self.follow_visible();
        }
    }

    /// Report every section still in view, in document order; the last one wins.
    fn follow_visible(&mut self) {
        for id in self.observer.visible_ids() {
            if let Some(index) = self.registry.position(id) {
                self.arbiter.report_in_view(index);
            }
        }
        debug!(
            active = self.arbiter.active_index(),
            "Active section resynced after suppression"
        );
    }

    fn sync_visibility(&mut self) {
        if !self.container.has_layout() {
            return;
        }
        self.observer
            .update(self.container.extents(), self.container.viewport());
        dispatch_visibility(&mut self.observer, &mut self.arbiter, &self.registry);
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("sections", &self.registry.len())
            .field("arbiter", &self.arbiter)
            .field("offset", &self.container.offset())
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapdeck_types::ui::HitRegion;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// Header 3, seven 20-row sections, footer 3, viewport 20.
    fn layout(registry: &SectionRegistry) -> DocumentLayout {
        DocumentLayout {
            header_height: 3,
            sections: registry.ids().into_iter().map(|id| (id, 20)).collect(),
            footer_height: 3,
            viewport_height: 20,
        }
    }

    fn app() -> App {
        let mut app = App::from_config(None).unwrap().with_manual_clock();
        let layout = layout(app.registry());
        app.set_layout(layout);
        app
    }

    fn run(app: &mut App, from: Duration, until: Duration) {
        let mut now = from;
        while now < until {
            now += ms(8);
            app.tick_at(now);
        }
    }

    #[test]
    fn starts_on_first_section_with_it_visible() {
        let app = app();
        assert_eq!(app.active_index(), 0);
        assert!(app.observer().is_visible(&app.registry().ids()[0]));
        assert!(!app.prev_enabled());
        assert!(app.next_enabled());
    }

    #[test]
    fn header_height_becomes_observer_margin() {
        let app = app();
        assert_eq!(app.observer().options().top_margin, 3);
    }

    #[test]
    fn configured_header_offset_wins() {
        let settings = ScrollSettings {
            header_offset: Some(5),
            ..ScrollSettings::default()
        };
        let mut app = App::new(SectionRegistry::builtin(), settings, UiOptions::default());
        let layout = layout(app.registry());
        app.set_layout(layout);
        assert_eq!(app.observer().options().top_margin, 5);
    }

    #[test]
    fn release_resyncs_with_sections_in_view() {
        let mut app = app();
        app.navigate_to(1);
        run(&mut app, Duration::ZERO, ms(700));
        // Wheel onward to section 5 while suppressed: rows 86..103 of the root area.
        app.scroll_lines(63);
        assert_eq!(app.active_index(), 1);

        run(&mut app, ms(700), ms(1008));
        assert!(!app.is_programmatic_scroll());
        assert_eq!(app.active_index(), 4);
        assert!(app.observer().is_visible(&app.registry().ids()[4]));
    }

    #[test]
    fn release_picks_the_last_visible_section() {
        let mut app = app();
        app.navigate_to(2);
        run(&mut app, Duration::ZERO, ms(700));
        // Root area rows 73..90 straddles sections 4 and 5, both out of snapping reach.
        app.scroll_lines(30);
        assert_eq!(app.active_index(), 2);

        run(&mut app, ms(700), ms(1008));
        assert_eq!(app.active_index(), 4);
    }

    #[test]
    fn window_opens_when_navigation_is_requested() {
        let mut app = App::from_config(None).unwrap();
        let layout = layout(app.registry());
        app.set_layout(layout);

        std::thread::sleep(ms(20));
        app.navigate_to(3);
        let deadline = app.suppression_deadline().unwrap();
        assert!(deadline >= ms(1020), "deadline {deadline:?}");
    }

    #[test]
    fn manual_clock_schedules_from_the_last_tick() {
        let mut app = app();
        run(&mut app, Duration::ZERO, ms(48));
        app.navigate_to(2);
        assert_eq!(app.suppression_deadline(), Some(ms(1048)));
        run(&mut app, ms(48), ms(1048));
        assert_eq!(app.suppression_deadline(), None);
    }

    #[test]
    fn navigation_sweep_does_not_override_destination() {
        let mut app = app();
        assert!(app.handle_nav(NavAction::Last));
        assert_eq!(app.active_index(), 6);

        // The smooth scroll passes sections 2..6 while suppressed.
        run(&mut app, Duration::ZERO, ms(700));
        assert!(!app.container().is_animating());
        assert_eq!(app.active_index(), 6);
        assert!(app.is_programmatic_scroll());

        run(&mut app, ms(700), ms(1100));
        assert!(!app.is_programmatic_scroll());
        assert_eq!(app.active_index(), 6);
        assert!(!app.next_enabled());
    }

    #[test]
    fn next_at_last_section_does_nothing() {
        let mut app = app();
        app.navigate_to(6);
        run(&mut app, Duration::ZERO, ms(1100));
        let offset = app.container().offset();

        assert!(!app.handle_nav(NavAction::Next));
        assert_eq!(app.active_index(), 6);
        assert!(!app.container().is_animating());
        assert!((app.container().offset() - offset).abs() < f32::EPSILON);
    }

    #[test]
    fn free_scroll_updates_active_section_from_viewport() {
        let mut app = App::new(
            SectionRegistry::builtin(),
            ScrollSettings {
                snap_proximity: 0.0,
                ..ScrollSettings::default()
            },
            UiOptions::default(),
        )
        .with_manual_clock();
        let layout = layout(app.registry());
        app.set_layout(layout);

        app.scroll_lines(12);
        // Section 2 starts at row 23; root area is rows 15..32.
        assert_eq!(app.active_index(), 1);
    }

    #[test]
    fn clicks_dispatch_through_hit_regions() {
        let mut app = app();
        app.view_mut().hit_regions = vec![
            HitRegion { x: 0, y: 0, width: 6, height: 1, target: ClickTarget::PrevButton },
            HitRegion { x: 10, y: 0, width: 6, height: 1, target: ClickTarget::NextButton },
            HitRegion { x: 30, y: 5, width: 1, height: 1, target: ClickTarget::Dot(4) },
        ];

        assert!(!app.click(2, 0), "prev is disabled on the first section");
        assert!(app.click(30, 5));
        assert_eq!(app.active_index(), 4);
        assert!(app.click(12, 0));
        assert_eq!(app.active_index(), 5);
        assert!(!app.click(50, 50));
    }

    #[test]
    fn quit_flag() {
        let mut app = app();
        assert!(!app.should_quit());
        app.request_quit();
        assert!(app.should_quit());
    }
}
