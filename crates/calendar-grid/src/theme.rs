//! Light/dark palettes for event color tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Concrete colors for one event block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub background: &'static str,
    pub foreground: &'static str,
}

// (tag, light background, dark background)
const PALETTE: &[(&str, &str, &str)] = &[
    ("blue", "#dbeafe", "#1e3a8a"),
    ("green", "#dcfce7", "#14532d"),
    ("red", "#fee2e2", "#7f1d1d"),
    ("yellow", "#fef9c3", "#713f12"),
    ("purple", "#f3e8ff", "#581c87"),
    ("orange", "#ffedd5", "#7c2d12"),
    ("gray", "#f3f4f6", "#374151"),
];

const DEFAULT_TAG: &str = "blue";

impl Theme {
    fn foreground(self) -> &'static str {
        match self {
            Theme::Light => "#111827",
            Theme::Dark => "#f9fafb",
        }
    }

    /// Resolve a color tag. Unknown or empty tags get the default color.
    pub fn swatch(self, tag: &str) -> Swatch {
        let wanted = tag.trim().to_ascii_lowercase();
        let entry = PALETTE
            .iter()
            .find(|(name, _, _)| *name == wanted)
            .or_else(|| {
                if !wanted.is_empty() {
                    tracing::warn!(tag = %tag, "unknown event color tag, using default");
                }
                PALETTE.iter().find(|(name, _, _)| *name == DEFAULT_TAG)
            });
        let background = match (entry, self) {
            (Some((_, light, _)), Theme::Light) => *light,
            (Some((_, _, dark)), Theme::Dark) => *dark,
            (None, _) => "#dbeafe",
        };
        Swatch {
            background,
            foreground: self.foreground(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(CalendarError::InvalidConfig(format!("unknown theme '{}'", s))),
        }
    }
}
