//! End-to-end section tracking: navigation, visibility and the suppression window
//! driven through `App` the way the frame loop drives it.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use snapdeck_engine::{App, NavAction, ScrollSettings, ScrollState, ui::UiOptions};
use snapdeck_tui::apply_event;

use crate::common::{app_with, builtin_app, ms, run_frames};

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Jumps instead of animating and never snaps, so offsets are exact.
fn instant_app() -> App {
    app_with(
        ScrollSettings {
            snap_proximity: 0.0,
            ..ScrollSettings::default()
        },
        UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        },
    )
}

#[test]
fn overshooting_scroll_is_ignored_until_the_window_closes() {
    let mut app = instant_app();

    apply_event(&mut app, press(KeyCode::Down));
    assert_eq!(
        app.state(),
        ScrollState {
            active_index: 1,
            is_programmatic_scroll: true
        }
    );

    // A fast wheel flick carries the viewport on to section 4.
    run_frames(&mut app, Duration::ZERO, ms(400));
    app.scroll_lines(42);
    assert!(app.observer().is_visible(&app.registry().ids()[3]));
    assert_eq!(app.active_index(), 1);

    // Once the window closes the index catches up with the screen.
    run_frames(&mut app, ms(400), ms(1000));
    assert!(!app.is_programmatic_scroll());
    assert_eq!(app.active_index(), 3);

    // Settling back onto section 3 is followed as usual.
    app.scroll_lines(-22);
    assert_eq!(app.active_index(), 2);
}

#[test]
fn release_never_leaves_the_active_section_off_screen() {
    let mut app = instant_app();
    apply_event(&mut app, press(KeyCode::Down));
    run_frames(&mut app, Duration::ZERO, ms(400));
    app.scroll_lines(42);

    run_frames(&mut app, ms(400), ms(1500));
    let visible: Vec<usize> = app
        .registry()
        .ids()
        .iter()
        .enumerate()
        .filter(|(_, id)| app.observer().is_visible(id))
        .map(|(index, _)| index)
        .collect();
    assert!(
        visible.contains(&app.active_index()),
        "active {} not among visible {visible:?}",
        app.active_index()
    );
}

#[test]
fn second_navigation_restarts_the_window() {
    let mut app = builtin_app();
    assert!(app.handle_nav(NavAction::Next));
    run_frames(&mut app, Duration::ZERO, ms(600));
    assert!(app.handle_nav(NavAction::Next));
    assert_eq!(app.active_index(), 2);

    run_frames(&mut app, ms(600), ms(1200));
    assert!(app.is_programmatic_scroll(), "first window must not release");

    run_frames(&mut app, ms(1200), ms(1600));
    assert!(!app.is_programmatic_scroll());
    assert_eq!(app.active_index(), 2);
}

#[test]
fn smooth_scroll_settles_on_the_destination() {
    let mut app = builtin_app();
    apply_event(&mut app, press(KeyCode::End));
    assert_eq!(app.active_index(), 6);
    assert!(app.container().is_animating());

    run_frames(&mut app, Duration::ZERO, ms(1100));
    let target = app
        .container()
        .scroll_target(&app.registry().ids()[6])
        .unwrap();
    assert!((app.container().offset() - target).abs() < f32::EPSILON);
    assert_eq!(app.active_index(), 6);
    assert!(!app.is_programmatic_scroll());
}

#[test]
fn next_keys_at_the_last_section_change_nothing() {
    let mut app = builtin_app();
    app.navigate_to(6);
    run_frames(&mut app, Duration::ZERO, ms(1100));
    let offset = app.container().offset();

    for code in [KeyCode::Down, KeyCode::PageDown] {
        apply_event(&mut app, press(code));
        assert_eq!(app.active_index(), 6);
        assert!(!app.is_programmatic_scroll());
        assert!(!app.container().is_animating());
        assert!((app.container().offset() - offset).abs() < f32::EPSILON);
    }
}

#[test]
fn prev_keys_at_the_first_section_change_nothing() {
    let mut app = builtin_app();
    for code in [KeyCode::Up, KeyCode::PageUp] {
        apply_event(&mut app, press(code));
        assert_eq!(app.active_index(), 0);
        assert!(!app.is_programmatic_scroll());
    }
}

#[test]
fn home_and_end_jump_to_the_ends() {
    let mut app = instant_app();
    apply_event(&mut app, press(KeyCode::End));
    assert_eq!(app.active_index(), 6);
    apply_event(&mut app, press(KeyCode::Home));
    assert_eq!(app.active_index(), 0);
    assert!(app.container().offset().abs() < f32::EPSILON);
}

#[test]
fn navigate_to_sets_every_index_immediately() {
    let mut app = builtin_app();
    for index in [3, 0, 6, 2, 2, 5] {
        app.navigate_to(index);
        assert_eq!(app.active_index(), index);
        assert!(app.is_programmatic_scroll());
    }
}

#[test]
fn free_scrolling_tracks_the_viewport() {
    let mut app = instant_app();
    for _ in 0..4 {
        apply_event(&mut app, press(KeyCode::Char('j')));
    }
    // Offset 4: only row 23 of section 2 is inside the root area (rows 7..24).
    assert_eq!(app.active_index(), 0);

    for _ in 0..4 {
        apply_event(
            &mut app,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            }),
        );
    }
    // Offset 16: section 2 fills rows 23..36 of the root area.
    assert_eq!(app.active_index(), 1);
    assert!(!app.is_programmatic_scroll());
}

#[test]
fn buttons_follow_the_active_section() {
    let mut app = instant_app();
    assert!(!app.prev_enabled());
    assert!(app.next_enabled());

    app.navigate_to(3);
    assert!(app.prev_enabled());
    assert!(app.next_enabled());

    app.navigate_to(6);
    assert!(app.prev_enabled());
    assert!(!app.next_enabled());
}
