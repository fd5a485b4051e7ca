//! The composite mood: a title, a palette and a row of emojis, each
//! independently lockable.
//!
//! Field names on the wire follow the persisted history format
//! (`isTitleLocked`, `hex`, `char`, `isLocked`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::MoodboardError;

/// Hue/saturation/lightness color. Hue is in degrees, the other two in
/// percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    /// Converts to a `#rrggbb` string.
    pub fn to_hex(self) -> String {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl FromStr for Hsl {
    type Err = MoodboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoodboardError::InvalidColor(s.to_string());
        let body = s
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let mut parts = body.split(',').map(str::trim);
        let mut component = |percent: bool| -> Result<f32, MoodboardError> {
            let raw = parts.next().ok_or_else(invalid)?;
            let raw = if percent {
                raw.strip_suffix('%').ok_or_else(invalid)?
            } else {
                raw
            };
            let value: f32 = raw.trim().parse().map_err(|_| invalid())?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(invalid())
            }
        };

        let hue = component(false)?;
        let saturation = component(true)?;
        let lightness = component(true)?;
        if parts.next().is_some()
            || !(0.0..=100.0).contains(&saturation)
            || !(0.0..=100.0).contains(&lightness)
        {
            return Err(invalid());
        }

        Ok(Self {
            hue,
            saturation,
            lightness,
        })
    }
}

impl TryFrom<String> for Hsl {
    type Error = MoodboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hsl> for String {
    fn from(value: Hsl) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorItem {
    pub id: String,
    #[serde(rename = "hex", alias = "value")]
    pub value: Hsl,
    #[serde(rename = "isLocked", alias = "locked")]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiItem {
    pub id: String,
    #[serde(rename = "char", alias = "glyph")]
    pub glyph: String,
    #[serde(rename = "isLocked", alias = "locked")]
    pub locked: bool,
}

/// The single document being edited.
///
/// List lengths are fixed when the mood is created; every operation replaces
/// values in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodState {
    pub title: String,
    #[serde(rename = "isTitleLocked", alias = "titleLocked")]
    pub title_locked: bool,
    pub colors: Vec<ColorItem>,
    pub emojis: Vec<EmojiItem>,
}

impl MoodState {
    pub fn color(&self, id: &str) -> Option<&ColorItem> {
        self.colors.iter().find(|color| color.id == id)
    }

    pub fn emoji(&self, id: &str) -> Option<&EmojiItem> {
        self.emojis.iter().find(|emoji| emoji.id == id)
    }

    /// Whether two moods show the same content, ignoring element ids.
    pub fn same_content(&self, other: &MoodState) -> bool {
        self.title == other.title
            && self.title_locked == other.title_locked
            && self.colors.len() == other.colors.len()
            && self.emojis.len() == other.emojis.len()
            && self
                .colors
                .iter()
                .zip(&other.colors)
                .all(|(a, b)| a.value == b.value && a.locked == b.locked)
            && self
                .emojis
                .iter()
                .zip(&other.emojis)
                .all(|(a, b)| a.glyph == b.glyph && a.locked == b.locked)
    }
}

/// Element addressed by a lock toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockTarget {
    Title,
    Color(String),
    Emoji(String),
}

/// List addressed by a reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Colors,
    Emojis,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Colors => "colors",
            ListKind::Emojis => "emojis",
        }
    }
}
