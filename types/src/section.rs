//! Section definitions: the navigable content blocks of the deck.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sanitize_terminal_text;

// ============================================================================
// SectionId
// ============================================================================

/// Stable, unique identifier of a section (the scroll target key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionIdError {
    #[error("section id must not be empty")]
    Empty,
    #[error("section id {0:?} must not contain whitespace or control characters")]
    InvalidChar(String),
}

impl SectionId {
    pub fn new(value: impl Into<String>) -> Result<Self, SectionIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SectionIdError::Empty);
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SectionIdError::InvalidChar(value));
        }
        Ok(Self(value))
    }

    /// Id of the `n`th built-in section (`section-<n>`), valid by construction.
    pub(crate) fn builtin(n: usize) -> Self {
        Self(format!("section-{n}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SectionId {
    type Error = SectionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SectionId {
    type Error = SectionIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ThemeTag
// ============================================================================

/// Named hue used for section gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Blue,
    Purple,
    Pink,
    Red,
    Orange,
    Amber,
    Yellow,
    Green,
}

impl Hue {
    pub const ALL: [Hue; 8] = [
        Hue::Blue,
        Hue::Purple,
        Hue::Pink,
        Hue::Red,
        Hue::Orange,
        Hue::Amber,
        Hue::Yellow,
        Hue::Green,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Hue::Blue => "blue",
            Hue::Purple => "purple",
            Hue::Pink => "pink",
            Hue::Red => "red",
            Hue::Orange => "orange",
            Hue::Amber => "amber",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Hue::ALL
            .into_iter()
            .find(|hue| hue.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Two-stop gradient tag (`"blue-purple"`) describing a section's look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeTag {
    pub from: Hue,
    pub to: Hue,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid theme tag {raw:?}: expected `<hue>-<hue>` using one of blue, purple, pink, red, orange, amber, yellow, green")]
pub struct ThemeTagError {
    raw: String,
}

impl ThemeTag {
    #[must_use]
    pub const fn new(from: Hue, to: Hue) -> Self {
        Self { from, to }
    }
}

impl FromStr for ThemeTag {
    type Err = ThemeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ThemeTagError { raw: s.to_string() };
        let (from, to) = s.split_once('-').ok_or_else(err)?;
        Ok(Self {
            from: Hue::parse(from).ok_or_else(err)?,
            to: Hue::parse(to).ok_or_else(err)?,
        })
    }
}

impl TryFrom<String> for ThemeTag {
    type Error = ThemeTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeTag> for String {
    fn from(value: ThemeTag) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ThemeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from.as_str(), self.to.as_str())
    }
}

// ============================================================================
// Section
// ============================================================================

/// Detail block rendered under a section's description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub heading: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// One navigable content block. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub description: String,
    pub theme: ThemeTag,
    pub cards: Vec<Card>,
}

impl Section {
    #[must_use]
    pub fn new(
        id: SectionId,
        title: impl Into<String>,
        description: impl Into<String>,
        theme: ThemeTag,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            theme,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Strips terminal control sequences from every displayed string.
    ///
    /// Sections read from user config go through this before they reach the renderer.
    #[must_use]
    pub fn sanitized(self) -> Self {
        fn clean(text: String) -> String {
            sanitize_terminal_text(&text).into_owned()
        }
        Self {
            id: self.id,
            title: clean(self.title),
            description: clean(self.description),
            theme: self.theme,
            cards: self
                .cards
                .into_iter()
                .map(|card| Card {
                    heading: clean(card.heading),
                    lines: card.lines.into_iter().map(clean).collect(),
                })
                .collect(),
        }
    }
}
