//! TUI rendering for Snapdeck using ratatui.
//!
//! The screen is a window onto a tall document (header, sections, footer).
//! The header stays pinned to the top rows; the position dots float over the
//! right edge. Every frame re-measures the document and hands the geometry to
//! the engine before drawing the visible slice.

mod document;
mod input;
mod theme;

pub use input::{InputPump, WHEEL_ROWS, apply_event, handle_events, nav_action};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use snapdeck_engine::{
    App, DocumentLayout, ThemeTag,
    ui::{ClickTarget, HitRegion},
};

use self::document::{CONTENT_PADDING, MeasuredSection, measure, section_lines};

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;
/// Columns reserved on the right for the position dots.
pub const DOTS_WIDTH: u16 = 4;

const TITLE: &str = "Snap Scroll Demo";
const SUBTITLE: &str = "Experience smooth scrolling";
const NAV_HINT: &str = "Use arrow keys or scroll to navigate";

/// Vertical slice of a document block that is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visible {
    /// Screen rect the slice occupies.
    area: Rect,
    /// Rows of the block scrolled above the top of the screen.
    skip: u16,
}

fn visible_slice(area: Rect, offset: u32, top: u32, height: u32) -> Option<Visible> {
    let view_bottom = offset + u32::from(area.height);
    let start = top.max(offset);
    let end = top.saturating_add(height).min(view_bottom);
    if start >= end {
        return None;
    }
    Some(Visible {
        area: Rect::new(
            area.x,
            area.y + (start - offset) as u16,
            area.width,
            (end - start) as u16,
        ),
        skip: (start - top) as u16,
    })
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let area = frame.area();

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, area);

    let content_area = Rect {
        width: area.width.saturating_sub(DOTS_WIDTH),
        ..area
    };

    let count = app.section_count();
    let measured: Vec<MeasuredSection> = app
        .registry()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let lines = section_lines(section, index, count, &palette, &glyphs);
            measure(lines, content_area.width, area.height)
        })
        .collect();

    let layout = DocumentLayout {
        header_height: HEADER_HEIGHT,
        sections: app
            .registry()
            .ids()
            .into_iter()
            .zip(measured.iter().map(|section| section.height))
            .collect(),
        footer_height: FOOTER_HEIGHT,
        viewport_height: area.height,
    };
    app.set_layout(layout);

    let offset = app.container().row_offset();
    let mut hit_regions = Vec::new();

    for (extent, (section, measured)) in app
        .container()
        .extents()
        .iter()
        .zip(app.registry().iter().zip(&measured))
    {
        let Some(visible) = visible_slice(content_area, offset, extent.top, extent.height) else {
            continue;
        };
        draw_section(frame, visible, section.theme, measured, &palette);
    }

    let footer_top = app
        .container()
        .total_height()
        .saturating_sub(u32::from(FOOTER_HEIGHT));
    if let Some(visible) = visible_slice(area, offset, footer_top, u32::from(FOOTER_HEIGHT)) {
        draw_footer(frame, app, visible, &palette, &glyphs, &mut hit_regions);
    }

    draw_header(frame, app, area, &palette);
    draw_dots(frame, app, area, &palette, &glyphs, &mut hit_regions);

    app.view_mut().hit_regions = hit_regions;
}

fn draw_section(
    frame: &mut Frame,
    visible: Visible,
    theme: ThemeTag,
    measured: &MeasuredSection,
    palette: &Palette,
) {
    let (from, _) = palette.gradient(theme);
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(from))
        .style(Style::default().bg(palette.bg_panel));

    let inner = block.inner(visible.area);
    frame.render_widget(block, visible.area);

    let inner = Rect {
        x: inner.x + CONTENT_PADDING.saturating_sub(1),
        width: inner.width.saturating_sub(CONTENT_PADDING * 2 - 1),
        ..inner
    };

    let mut lines: Vec<Line> = vec![Line::from(""); measured.pad_top as usize];
    lines.extend(measured.lines.iter().cloned());

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((visible.skip, 0));
    frame.render_widget(paragraph, inner);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let header_area = Rect {
        height: HEADER_HEIGHT.min(area.height),
        ..area
    };
    if header_area.height == 0 {
        return;
    }

    // Sections scroll underneath.
    frame.render_widget(Clear, header_area);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_highlight));
    let inner = block.inner(header_area);
    frame.render_widget(block, header_area);

    let title = format!(" {TITLE}");
    let badge = format!(" Section {}/{} ", app.active_index() + 1, app.section_count());
    let gap = usize::from(inner.width)
        .saturating_sub(title.width() + badge.width() + 1)
        .max(1);

    let lines = vec![
        Line::from(vec![
            Span::styled(title, styles::header_title(palette)),
            Span::raw(" ".repeat(gap)),
            Span::styled(badge, styles::counter_badge(palette)),
        ]),
        Line::from(Span::styled(
            format!(" {SUBTITLE}"),
            styles::header_subtitle(palette),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(
    frame: &mut Frame,
    app: &App,
    visible: Visible,
    palette: &Palette,
    glyphs: &Glyphs,
    hit_regions: &mut Vec<HitRegion>,
) {
    let width = visible.area.width;
    let buttons = app.nav_buttons();

    let copyright = format!(" {} 2025 {TITLE}", glyphs.copyright);
    let prev = format!(" {} Prev ", glyphs.arrow_left);
    let next = format!(" Next {} ", glyphs.arrow_right);
    let buttons_width = prev.width() + 1 + next.width() + 1;

    let hint = format!("{NAV_HINT}  ");
    let show_hint = copyright.width() + hint.width() + buttons_width < usize::from(width);
    let hint_width = if show_hint { hint.width() } else { 0 };
    let gap = usize::from(width).saturating_sub(copyright.width() + hint_width + buttons_width);

    let mut spans = vec![
        Span::styled(copyright.clone(), styles::key_hint(palette)),
        Span::raw(" ".repeat(gap)),
    ];
    if show_hint {
        spans.push(Span::styled(hint, styles::key_hint(palette)));
    }
    spans.extend([
        Span::styled(prev.clone(), styles::button(palette, buttons.prev_enabled)),
        Span::raw(" "),
        Span::styled(next.clone(), styles::button(palette, buttons.next_enabled)),
    ]);

    let lines = vec![
        Line::from(Span::styled(
            glyphs.rule.repeat(usize::from(width)),
            Style::default().fg(palette.bg_border),
        )),
        Line::from(spans),
        Line::from(""),
    ];
    let footer = Paragraph::new(lines)
        .style(Style::default().bg(palette.bg_highlight))
        .scroll((visible.skip, 0));
    frame.render_widget(footer, visible.area);

    // Buttons sit on the footer's second row.
    let Some(row) = (visible.area.y + 1).checked_sub(visible.skip) else {
        return;
    };
    if row < visible.area.y.max(HEADER_HEIGHT) || row >= visible.area.bottom() {
        return;
    }
    let prev_x = visible.area.x as usize + copyright.width() + gap + hint_width;
    let next_x = prev_x + prev.width() + 1;
    if next_x + next.width() > usize::from(visible.area.right()) {
        return;
    }
    hit_regions.push(HitRegion {
        x: prev_x as u16,
        y: row,
        width: prev.width() as u16,
        height: 1,
        target: ClickTarget::PrevButton,
    });
    hit_regions.push(HitRegion {
        x: next_x as u16,
        y: row,
        width: next.width() as u16,
        height: 1,
        target: ClickTarget::NextButton,
    });
}

fn draw_dots(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
    hit_regions: &mut Vec<HitRegion>,
) {
    let indicators = app.indicators();
    let count = indicators.len() as u16;
    if area.width < DOTS_WIDTH || count == 0 {
        return;
    }

    // One blank row between dots when there is room.
    let stride: u16 = if count * 2 - 1 <= area.height { 2 } else { 1 };
    let span = (count - 1) * stride + 1;
    if span > area.height {
        return;
    }
    let top = area.y + (area.height - span) / 2;
    let x = area.right() - 2;

    for indicator in indicators {
        let y = top + indicator.index as u16 * stride;
        let glyph = if indicator.active {
            glyphs.dot_active
        } else {
            glyphs.dot_inactive
        };
        frame.render_widget(
            Paragraph::new(Span::styled(glyph, styles::dot(palette, indicator.active))),
            Rect::new(x, y, 1, 1),
        );
        hit_regions.push(HitRegion {
            x: x - 1,
            y,
            width: 3,
            height: 1,
            target: ClickTarget::Dot(indicator.index),
        });
    }
}
