//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use snapdeck_engine::{App, DocumentLayout, ScrollSettings, SectionRegistry, ui::UiOptions};

pub const HEADER: u16 = 3;
pub const FOOTER: u16 = 3;
pub const VIEWPORT: u16 = 20;
/// Frame cadence used by the binary's render loop.
pub const FRAME: Duration = Duration::from_millis(8);

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Every section one screen tall, like the built-in deck on a roomy terminal.
pub fn uniform_layout(app: &App, section_height: u32) -> DocumentLayout {
    DocumentLayout {
        header_height: HEADER,
        sections: app
            .registry()
            .ids()
            .into_iter()
            .map(|id| (id, section_height))
            .collect(),
        footer_height: FOOTER,
        viewport_height: VIEWPORT,
    }
}

/// Built-in deck, default timings, laid out with 20-row sections, on a manual clock.
pub fn builtin_app() -> App {
    app_with(ScrollSettings::default(), UiOptions::default())
}

pub fn app_with(settings: ScrollSettings, options: UiOptions) -> App {
    let mut app = App::new(SectionRegistry::builtin(), settings, options).with_manual_clock();
    let layout = uniform_layout(&app, u32::from(VIEWPORT));
    app.set_layout(layout);
    app
}

/// Tick `app` at frame cadence from `from` (exclusive) through `until`.
pub fn run_frames(app: &mut App, from: Duration, until: Duration) {
    let mut now = from;
    while now < until {
        now = (now + FRAME).min(until);
        app.tick_at(now);
    }
}

/// Write `contents` to a config file inside a fresh temp dir.
pub fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}
