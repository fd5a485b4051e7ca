//! Random selection primitives.
//!
//! Every function takes the random source explicitly so callers can pass a
//! seeded generator for deterministic runs.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    library::{EmojiCatalogEntry, EmojiCategory, ADJECTIVES, EMOJI_CATALOG, NOUNS},
    mood::Hsl,
};

const HUE_RANGE: std::ops::Range<f32> = 0.0..360.0;
const SATURATION_RANGE: std::ops::RangeInclusive<f32> = 60.0..=90.0;
const LIGHTNESS_RANGE: std::ops::RangeInclusive<f32> = 40.0..=60.0;

/// Category and search term applied to emoji draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiFilter {
    /// `None` is the "all" wildcard.
    pub category: Option<EmojiCategory>,
    pub search: String,
}

impl EmojiFilter {
    pub fn new(category: Option<EmojiCategory>, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none() && self.search.trim().is_empty()
    }

    fn pool(&self) -> Vec<&'static EmojiCatalogEntry> {
        let term = self.search.trim().to_lowercase();
        EMOJI_CATALOG
            .iter()
            .filter(|entry| self.category.map_or(true, |c| entry.category == c))
            .filter(|entry| term.is_empty() || entry.matches(&term))
            .collect()
    }
}

/// Picks one adjective and one noun and joins them with a space.
pub fn random_title<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    format!("{adjective} {noun}")
}

/// Draws a vivid color: any hue, saturation 60-90%, lightness 40-60%.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Hsl {
    Hsl {
        hue: rng.gen_range(HUE_RANGE),
        saturation: rng.gen_range(SATURATION_RANGE),
        lightness: rng.gen_range(LIGHTNESS_RANGE),
    }
}

/// Returns up to `count` distinct glyphs from the filtered pool in random
/// order. A filter that matches nothing falls back to the full catalog, so
/// the result is only ever short when `count` exceeds the catalog size.
pub fn random_emoji_subset<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    filter: &EmojiFilter,
) -> Vec<&'static str> {
    let mut pool = filter.pool();
    if pool.is_empty() {
        tracing::debug!(?filter, "emoji filter matched nothing, using full catalog");
        pool = EMOJI_CATALOG.iter().collect();
    }

    pool.shuffle(rng);
    pool.into_iter().take(count).map(|entry| entry.glyph).collect()
}

/// Number of catalog entries the filter matches before any fallback.
pub fn pool_size(filter: &EmojiFilter) -> usize {
    filter.pool().len()
}

/// Fresh element identity drawn from the same random source.
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}
