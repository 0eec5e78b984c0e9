//! Section content and measurement.
//!
//! Sections are at least one screen tall; taller content grows the section so
//! long sections scroll freely. Content is vertically centered within the
//! section, like a full-height hero block.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use snapdeck_engine::Section;

use crate::theme::{Glyphs, Palette, styles};

/// Horizontal padding on each side of section content.
pub(crate) const CONTENT_PADDING: u16 = 2;

/// A section's lines plus its resolved height in document rows.
pub(crate) struct MeasuredSection {
    pub lines: Vec<Line<'static>>,
    pub height: u32,
    /// Blank rows above the content.
    pub pad_top: u32,
}

pub(crate) fn section_lines(
    section: &Section,
    index: usize,
    count: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    let (from, to) = palette.gradient(section.theme);
    let mut lines = vec![
        Line::from(Span::styled(section.title.clone(), styles::section_title(from))).centered(),
        Line::from(""),
        Line::from(Span::styled(
            section.description.clone(),
            Style::default().fg(to),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            format!("Section {} of {count}", index + 1),
            Style::default().fg(palette.text_muted),
        ))
        .centered(),
    ];

    for card in &section.cards {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            card.heading.clone(),
            styles::card_heading(palette),
        )));
        lines.push(Line::from(Span::styled(
            glyphs.rule.repeat(card.heading.chars().count().max(1)),
            Style::default().fg(palette.bg_border),
        )));
        for text in &card.lines {
            let text = match text.strip_prefix("• ") {
                Some(rest) => format!("{} {rest}", glyphs.bullet),
                None => text.clone(),
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(palette.text_secondary),
            )));
        }
    }
    lines
}

/// Rows `lines` occupy when wrapped to `width`.
pub(crate) fn wrapped_rows(lines: &[Line], width: u16) -> usize {
    if lines.is_empty() {
        return 0;
    }

    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1))
}

pub(crate) fn measure(lines: Vec<Line<'static>>, width: u16, viewport_height: u16) -> MeasuredSection {
    let inner_width = width.saturating_sub(CONTENT_PADDING * 2);
    // One blank row above and below the content at minimum.
    let content = wrapped_rows(&lines, inner_width) as u32 + 2;
    let height = content.max(u32::from(viewport_height)).max(1);
    let pad_top = (height - content) / 2 + 1;
    MeasuredSection {
        lines,
        height,
        pad_top,
    }
}
