//! Static content the generator draws from: title words and the emoji catalog.
//!
//! Everything here is read-only and process-wide. Each glyph appears exactly
//! once in the catalog and belongs to exactly one [`EmojiCategory`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::MoodboardError;

pub const ADJECTIVES: &[&str] = &[
    "Aggressive",
    "Mildly",
    "Suspiciously",
    "Caffeinated",
    "Sleepy",
    "Chaotic",
    "Distinguished",
    "Unbothered",
    "Deranged",
    "Radiant",
    "Glitchy",
    "Crunchy",
    "Spicy",
    "Melancholic",
    "Ascended",
    "Anxious",
    "Electric",
    "Velvet",
    "Gothic",
    "Wholesome",
    "Low-Battery",
    "Turbo",
    "Stinky",
    "Cosmic",
    "Petty",
];

pub const NOUNS: &[&str] = &[
    "Chaos",
    "Energy",
    "Cuddles",
    "Panic",
    "Silence",
    "Vibes",
    "Aura",
    "Gremlin",
    "Potato",
    "Wizard",
    "Main Character",
    "NPC",
    "Void",
    "Cloud",
    "Scream",
    "Noodle",
    "Spirit",
    "Goblin",
    "Shadow",
    "Manifestation",
];

/// Closed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiCategory {
    Faces,
    Animals,
    Food,
    Nature,
    Vibes,
}

impl EmojiCategory {
    pub const ALL: [EmojiCategory; 5] = [
        EmojiCategory::Faces,
        EmojiCategory::Animals,
        EmojiCategory::Food,
        EmojiCategory::Nature,
        EmojiCategory::Vibes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmojiCategory::Faces => "faces",
            EmojiCategory::Animals => "animals",
            EmojiCategory::Food => "food",
            EmojiCategory::Nature => "nature",
            EmojiCategory::Vibes => "vibes",
        }
    }

    /// Parses a filter selector. `"all"` (or an empty string) is the wildcard
    /// and maps to `None`.
    pub fn parse_selector(value: &str) -> Result<Option<Self>, MoodboardError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(WILDCARD) {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

/// Filter selector that matches every category. Never stored on an entry.
pub const WILDCARD: &str = "all";

impl fmt::Display for EmojiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmojiCategory {
    type Err = MoodboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MoodboardError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiCatalogEntry {
    pub glyph: &'static str,
    pub category: EmojiCategory,
    pub keywords: &'static [&'static str],
}

impl EmojiCatalogEntry {
    const fn new(
        glyph: &'static str,
        category: EmojiCategory,
        keywords: &'static [&'static str],
    ) -> Self {
        Self {
            glyph,
            category,
            keywords,
        }
    }

    /// Case-insensitive substring match against the glyph, any keyword or the
    /// category name. `term` must already be lowercased.
    pub fn matches(&self, term: &str) -> bool {
        self.glyph.to_lowercase().contains(term)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(term))
            || self.category.as_str().contains(term)
    }
}

use EmojiCategory::{Animals, Faces, Food, Nature, Vibes};

pub static EMOJI_CATALOG: &[EmojiCatalogEntry] = &[
    EmojiCatalogEntry::new("🫠", Faces, &["melting", "hot", "embarrassed", "mood", "vibe"]),
    EmojiCatalogEntry::new("🤡", Faces, &["clown", "funny", "joke"]),
    EmojiCatalogEntry::new("💀", Faces, &["dead", "skull", "laughing"]),
    EmojiCatalogEntry::new("👹", Faces, &["ogre", "scary", "mask"]),
    EmojiCatalogEntry::new("👽", Faces, &["alien", "space", "weird"]),
    EmojiCatalogEntry::new("👾", Faces, &["pixel", "game", "monster"]),
    EmojiCatalogEntry::new("🧠", Faces, &["brain", "smart", "think"]),
    EmojiCatalogEntry::new("🧿", Faces, &["evil eye", "nazar", "protection", "blue"]),
    EmojiCatalogEntry::new("🫡", Faces, &["salute", "respect"]),
    EmojiCatalogEntry::new("🫣", Faces, &["peeking", "shy", "scared"]),
    EmojiCatalogEntry::new("🫢", Faces, &["gasp", "surprise"]),
    EmojiCatalogEntry::new("🦕", Animals, &["dinosaur", "blue", "old"]),
    EmojiCatalogEntry::new("🐈", Animals, &["cat", "pet", "meow"]),
    EmojiCatalogEntry::new("🐕", Animals, &["dog", "pet", "woof"]),
    EmojiCatalogEntry::new("🐸", Animals, &["frog", "green", "jump"]),
    EmojiCatalogEntry::new("🦆", Animals, &["duck", "bird", "quack"]),
    EmojiCatalogEntry::new("🦋", Animals, &["butterfly", "fly", "blue"]),
    EmojiCatalogEntry::new("🦖", Animals, &["trex", "dino", "green"]),
    EmojiCatalogEntry::new("🐙", Animals, &["octopus", "sea", "pink"]),
    EmojiCatalogEntry::new("🐌", Animals, &["snail", "slow", "bug"]),
    EmojiCatalogEntry::new("🦦", Animals, &["otter", "water", "cute"]),
    EmojiCatalogEntry::new("🍕", Food, &["pizza", "cheese", "fast food"]),
    EmojiCatalogEntry::new("🧃", Food, &["juice", "box", "drink"]),
    EmojiCatalogEntry::new("🥐", Food, &["croissant", "bread", "french"]),
    EmojiCatalogEntry::new("🍭", Food, &["lollipop", "sweet", "candy"]),
    EmojiCatalogEntry::new("🍄", Food, &["mushroom", "magic", "nature"]),
    EmojiCatalogEntry::new("🍒", Food, &["cherry", "fruit", "red"]),
    EmojiCatalogEntry::new("🥑", Food, &["avocado", "green", "healthy"]),
    EmojiCatalogEntry::new("🍜", Food, &["noodles", "ramen", "soup"]),
    EmojiCatalogEntry::new("🍦", Food, &["ice cream", "cold", "sweet"]),
    EmojiCatalogEntry::new("🥯", Food, &["bagel", "bread", "breakfast"]),
    EmojiCatalogEntry::new("🌈", Nature, &["rainbow", "sky", "color"]),
    EmojiCatalogEntry::new("🔥", Nature, &["fire", "hot", "lit"]),
    EmojiCatalogEntry::new("✨", Nature, &["sparkles", "magic", "clean"]),
    EmojiCatalogEntry::new("🌸", Nature, &["flower", "pink", "spring"]),
    EmojiCatalogEntry::new("🌪️", Nature, &["tornado", "wind", "storm"]),
    EmojiCatalogEntry::new("🌊", Nature, &["wave", "ocean", "water"]),
    EmojiCatalogEntry::new("🫧", Nature, &["bubbles", "clean", "float"]),
    EmojiCatalogEntry::new("🧊", Nature, &["ice", "cube", "cold"]),
    EmojiCatalogEntry::new("🌵", Nature, &["cactus", "desert", "green"]),
    EmojiCatalogEntry::new("💅", Vibes, &["nails", "slay", "diva"]),
    EmojiCatalogEntry::new("💃", Vibes, &["dance", "party", "lady"]),
    EmojiCatalogEntry::new("🕺", Vibes, &["dance", "party", "man"]),
    EmojiCatalogEntry::new("🎡", Vibes, &["ferris wheel", "fair", "park"]),
    EmojiCatalogEntry::new("🛹", Vibes, &["skateboard", "skate", "cool"]),
    EmojiCatalogEntry::new("🕹️", Vibes, &["joystick", "game", "retro"]),
    EmojiCatalogEntry::new("📼", Vibes, &["vhs", "tape", "retro"]),
    EmojiCatalogEntry::new("💎", Vibes, &["gem", "diamond", "shiny"]),
    EmojiCatalogEntry::new("🧸", Vibes, &["teddy", "bear", "toy"]),
    EmojiCatalogEntry::new("🎈", Vibes, &["balloon", "party", "red"]),
    EmojiCatalogEntry::new("🔮", Vibes, &["crystal ball", "magic", "future"]),
    EmojiCatalogEntry::new("💿", Vibes, &["cd", "music", "retro"]),
];

/// Catalog data for a glyph currently on the board (category and keywords).
pub fn lookup(glyph: &str) -> Option<&'static EmojiCatalogEntry> {
    EMOJI_CATALOG.iter().find(|entry| entry.glyph == glyph)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn word_lists_are_populated() {
        assert!(!ADJECTIVES.is_empty());
        assert!(!NOUNS.is_empty());
    }

    #[test]
    fn catalog_glyphs_are_unique_and_real() {
        let mut seen = HashSet::new();
        for entry in EMOJI_CATALOG {
            assert!(seen.insert(entry.glyph), "duplicate glyph {}", entry.glyph);
            assert!(
                !entry.glyph.chars().any(|c| c.is_ascii()),
                "placeholder glyph `{}`",
                entry.glyph
            );
            assert!(!entry.keywords.is_empty());
        }
    }

    #[test]
    fn every_category_is_represented() {
        for category in EmojiCategory::ALL {
            assert!(EMOJI_CATALOG.iter().any(|entry| entry.category == category));
        }
    }

    #[test]
    fn parses_selectors() {
        assert_eq!(EmojiCategory::parse_selector("all").unwrap(), None);
        assert_eq!(EmojiCategory::parse_selector("").unwrap(), None);
        assert_eq!(
            EmojiCategory::parse_selector("Food").unwrap(),
            Some(EmojiCategory::Food)
        );
        let err = EmojiCategory::parse_selector("planets").unwrap_err();
        assert!(format!("{err}").contains("planets"));
    }

    #[test]
    fn looks_up_tooltip_data() {
        let entry = lookup("🐸").expect("frog is in the catalog");
        assert_eq!(entry.category, EmojiCategory::Animals);
        assert!(entry.keywords.contains(&"frog"));
        assert!(lookup("frog").is_none());
    }

    #[test]
    fn matches_keyword_glyph_and_category() {
        let pizza = lookup("🍕").unwrap();
        assert!(pizza.matches("chee"));
        assert!(pizza.matches("foo"));
        assert!(pizza.matches("🍕"));
        assert!(!pizza.matches("ocean"));
    }
}
