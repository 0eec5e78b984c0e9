//! Navigation requests: keys, buttons and position dots resolve to a target index.

/// A request to move between sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Prev,
    First,
    Last,
}

impl NavAction {
    /// Map a DOM-style key name. Unrecognized keys return `None` and should fall through.
    #[must_use]
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "PageDown" => Some(Self::Next),
            "ArrowUp" | "PageUp" => Some(Self::Prev),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }

    /// Index to navigate to from `active` in a deck of `count` sections.
    ///
    /// `Next` at the last section and `Prev` at the first produce no
    /// transition. `First` and `Last` always resolve, even when already there.
    #[must_use]
    pub fn target(self, active: usize, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let last = count - 1;
        match self {
            Self::Next => (active < last).then_some(active + 1),
            Self::Prev => (active > 0).then(|| (active - 1).min(last)),
            Self::First => Some(0),
            Self::Last => Some(last),
        }
    }
}

/// Enablement of the footer's Prev/Next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl NavButtons {
    #[must_use]
    pub fn for_position(active: usize, count: usize) -> Self {
        Self {
            prev_enabled: active > 0,
            next_enabled: active + 1 < count,
        }
    }
}

/// One position dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

#[must_use]
pub fn indicators(active: usize, count: usize) -> Vec<Indicator> {
    (0..count)
        .map(|index| Indicator {
            index,
            active: index == active,
        })
        .collect()
}
