//! Color theme and glyphs for Snapdeck TUI.
//!
//! Uses Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use snapdeck_engine::{Hue, ThemeTag, ui::UiOptions};

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray
    pub const TEXT_DISABLED: Color = Color::Rgb(84, 84, 109); // sumiInk6

    // === Primary/Brand ===
    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet

    // === Section hues ===
    pub const BLUE: Color = Color::Rgb(126, 156, 216); // crystalBlue
    pub const PURPLE: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const PINK: Color = Color::Rgb(210, 126, 153); // sakuraPink
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const AMBER: Color = Color::Rgb(220, 165, 97); // roninYellow
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen

    pub const ACCENT: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const PEACH: Color = ORANGE;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub primary: Color,
    pub accent: Color,
    pub peach: Color,
    pub blue: Color,
    pub purple: Color,
    pub pink: Color,
    pub red: Color,
    pub orange: Color,
    pub amber: Color,
    pub yellow: Color,
    pub green: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            primary: colors::PRIMARY,
            accent: colors::ACCENT,
            peach: colors::PEACH,
            blue: colors::BLUE,
            purple: colors::PURPLE,
            pink: colors::PINK,
            red: colors::RED,
            orange: colors::ORANGE,
            amber: colors::AMBER,
            yellow: colors::YELLOW,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            primary: Color::White,
            accent: Color::Cyan,
            peach: Color::Yellow,
            blue: Color::LightBlue,
            purple: Color::LightMagenta,
            pink: Color::Magenta,
            red: Color::LightRed,
            orange: Color::Yellow,
            amber: Color::Yellow,
            yellow: Color::LightYellow,
            green: Color::LightGreen,
        }
    }

    #[must_use]
    pub fn hue(&self, hue: Hue) -> Color {
        match hue {
            Hue::Blue => self.blue,
            Hue::Purple => self.purple,
            Hue::Pink => self.pink,
            Hue::Red => self.red,
            Hue::Orange => self.orange,
            Hue::Amber => self.amber,
            Hue::Yellow => self.yellow,
            Hue::Green => self.green,
        }
    }

    /// Start and end colors of a section's gradient.
    #[must_use]
    pub fn gradient(&self, theme: ThemeTag) -> (Color, Color) {
        (self.hue(theme.from), self.hue(theme.to))
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for indicators and buttons.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub dot_active: &'static str,
    pub dot_inactive: &'static str,
    pub arrow_left: &'static str,
    pub arrow_right: &'static str,
    pub bullet: &'static str,
    pub rule: &'static str,
    pub copyright: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            dot_active: "#",
            dot_inactive: "o",
            arrow_left: "<-",
            arrow_right: "->",
            bullet: "*",
            rule: "-",
            copyright: "(c)",
        }
    } else {
        Glyphs {
            dot_active: "●",
            dot_inactive: "○",
            arrow_left: "←",
            arrow_right: "→",
            bullet: "•",
            rule: "─",
            copyright: "©",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Color, Modifier, Palette, Style};

    #[must_use]
    pub fn header_title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn header_subtitle(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn counter_badge(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn section_title(color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn card_heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn button(palette: &Palette, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(palette.bg_dark)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(palette.text_disabled)
                .bg(palette.bg_panel)
        }
    }

    #[must_use]
    pub fn dot(palette: &Palette, active: bool) -> Style {
        if active {
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_muted)
        }
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}
