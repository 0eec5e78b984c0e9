//! The ordered, read-only table of sections.

use std::collections::HashSet;

use thiserror::Error;

use crate::section::{Card, Hue, Section, SectionId, ThemeTag};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a deck needs at least one section")]
    Empty,
    #[error("duplicate section id `{0}`")]
    DuplicateId(SectionId),
}

/// Ordered list of sections. Order is navigation order (`0..len`).
///
/// Never empty and ids are unique; both are checked at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<Section>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(&section.id) {
                return Err(RegistryError::DuplicateId(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// The seven-section showcase deck.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            sections: builtin_sections(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// A registry always holds at least one section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|section| &section.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }
}

fn builtin_section(n: usize, title: &str, description: &str, from: Hue, to: Hue) -> Section {
    Section::new(
        SectionId::builtin(n),
        title,
        description,
        ThemeTag::new(from, to),
    )
}

fn card(heading: &str, lines: &[&str]) -> Card {
    Card {
        heading: heading.to_string(),
        lines: lines.iter().map(ToString::to_string).collect(),
    }
}

fn builtin_sections() -> Vec<Section> {
    vec![
        builtin_section(
            1,
            "Welcome to Snap Scrolling",
            "Scroll down to experience smooth snap scrolling with best practices",
            Hue::Blue,
            Hue::Purple,
        ),
        builtin_section(
            2,
            "Smooth Navigation",
            "Each section snaps perfectly into view as you scroll",
            Hue::Purple,
            Hue::Pink,
        ),
        builtin_section(
            3,
            "Keyboard Accessible",
            "Use arrow keys or Page Up/Down to navigate between sections",
            Hue::Pink,
            Hue::Red,
        ),
        builtin_section(
            4,
            "Long Content Section",
            "This section has much more content to demonstrate how snap scrolling \
             handles variable-length sections. Notice you can scroll naturally within \
             this section without forced snapping!",
            Hue::Red,
            Hue::Orange,
        )
        .with_cards(vec![
            card(
                "Handling Variable-Length Sections",
                &[
                    "Sections of different lengths need to be handled gracefully. \
                     This one is taller than the screen on purpose.",
                    "• Proximity snapping: the view only settles on a section start \
                     when one is close, so long sections scroll freely",
                    "• Visibility tracking: a section counts as in view once 10% of \
                     it shows below the header",
                    "• Scroll margin: jumps land just below the sticky header",
                ],
            ),
            card(
                "Best Practices",
                &[
                    "1. Use the screen height as a baseline, but let sections grow",
                    "2. Test with both short and long content",
                    "3. Remember that \"long\" depends on the terminal size",
                    "4. Provide keyboard navigation as an alternative to scrolling",
                    "5. Show progress with indicators like the dots on the right",
                ],
            ),
            card(
                "User Experience",
                &[
                    "The goal is a scrolling experience that feels natural. You should be able to:",
                    "• Scroll freely within long sections",
                    "• Move smoothly between sections",
                    "• Navigate with keyboard or mouse",
                    "• Always know where you are in the deck",
                    "Try scrolling inside this section: it won't force you onward until you're ready.",
                ],
            ),
        ]),
        builtin_section(
            5,
            "Touch Friendly",
            "Optimized for both desktop and mobile interactions",
            Hue::Orange,
            Hue::Amber,
        ),
        builtin_section(
            6,
            "Navigation Indicators",
            "Visual dots show your current position in the scroll",
            Hue::Amber,
            Hue::Yellow,
        ),
        builtin_section(
            7,
            "Performance Optimized",
            "Only the visible slice of the deck is drawn each frame",
            Hue::Yellow,
            Hue::Green,
        ),
    ]
}
