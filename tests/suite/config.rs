//! Config files feeding a running deck.

use std::time::Duration;

use snapdeck_config::{ConfigError, SnapdeckConfig};
use snapdeck_engine::{App, NavAction};

use crate::common::{ms, run_frames, uniform_layout, write_config};

const CUSTOM_DECK: &str = r#"
[app]
reduced_motion = true

[scroll]
suppress_window_ms = 250
snap_proximity = 0.0

[[sections]]
id = "intro"
title = "Intro"
description = "Start here"
theme = "blue-purple"

[[sections]]
id = "middle"
title = "Middle"
theme = "pink-red"

[[sections.cards]]
heading = "Notes"
lines = ["one", "two"]

[[sections]]
id = "outro"
title = "Outro"
theme = "amber-green"
"#;

fn load_app(contents: &str) -> App {
    let (_dir, path) = write_config(contents);
    let config = SnapdeckConfig::load_from(&path).expect("config loads");
    let mut app = App::from_config(Some(&config))
        .expect("valid deck")
        .with_manual_clock();
    let layout = uniform_layout(&app, 20);
    app.set_layout(layout);
    app
}

#[test]
fn configured_sections_replace_the_builtin_deck() {
    let app = load_app(CUSTOM_DECK);
    let ids: Vec<String> = app
        .registry()
        .iter()
        .map(|section| section.id.to_string())
        .collect();
    assert_eq!(ids, ["intro", "middle", "outro"]);
    assert_eq!(app.registry().get(1).unwrap().cards.len(), 1);
    assert!(app.ui_options().reduced_motion);
}

#[test]
fn configured_suppress_window_is_used() {
    let mut app = load_app(CUSTOM_DECK);
    assert!(app.handle_nav(NavAction::Last));
    assert_eq!(app.active_index(), 2);
    // Reduced motion: already on the destination.
    assert!(!app.container().is_animating());

    run_frames(&mut app, Duration::ZERO, ms(248));
    assert!(app.is_programmatic_scroll());
    run_frames(&mut app, ms(248), ms(250));
    assert!(!app.is_programmatic_scroll());
    assert!(!app.next_enabled());
}

#[test]
fn empty_file_gives_builtin_deck_and_defaults() {
    let app = load_app("");
    assert_eq!(app.section_count(), 7);
    assert_eq!(app.settings().suppress_window, ms(1000));
    assert!(!app.ui_options().reduced_motion);
}

#[test]
fn malformed_file_reports_parse_error() {
    let (_dir, path) = write_config("[scroll\nsuppress_window_ms = ");
    match SnapdeckConfig::load_from(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_are_rejected_at_app_construction() {
    let (_dir, path) = write_config(
        r#"
[[sections]]
id = "same"
title = "One"
theme = "blue-green"

[[sections]]
id = "same"
title = "Two"
theme = "red-orange"
"#,
    );
    let config = SnapdeckConfig::load_from(&path).unwrap();
    let err = App::from_config(Some(&config)).unwrap_err();
    assert_eq!(err.to_string(), "duplicate section id `same`");
}

#[test]
fn control_sequences_in_titles_are_stripped() {
    let app = load_app(
        "
[[sections]]
id = \"x\"
title = \"Clean\\u001b]0;pwned\\u0007 title\"
theme = \"blue-green\"
",
    );
    assert_eq!(app.registry().get(0).unwrap().title, "Clean title");
}
