//! Mutation engine: every operation takes the current mood and yields a new
//! one, leaving the input untouched.

use rand::Rng;

use crate::{
    config::BoardConfig,
    library::EMOJI_CATALOG,
    mood::{ColorItem, EmojiItem, ListKind, LockTarget, MoodState},
    random::{new_id, random_color, random_emoji_subset, random_title, EmojiFilter},
    MoodboardError, Result,
};

/// Owns the random source and board shape used to generate and shuffle moods.
#[derive(Debug)]
pub struct MoodEngine<R> {
    rng: R,
    board: BoardConfig,
}

impl<R: Rng> MoodEngine<R> {
    /// An emoji count beyond the catalog size is clamped to it.
    pub fn new(rng: R, mut board: BoardConfig) -> Self {
        if board.emoji_count > EMOJI_CATALOG.len() {
            tracing::warn!(
                requested = board.emoji_count,
                available = EMOJI_CATALOG.len(),
                "emoji count exceeds the catalog, clamping"
            );
            board.emoji_count = EMOJI_CATALOG.len();
        }
        Self { rng, board }
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    /// Builds a completely fresh, fully unlocked mood with an unfiltered
    /// emoji draw.
    pub fn initialize(&mut self) -> MoodState {
        let rng = &mut self.rng;
        let title = random_title(rng);
        let colors = (0..self.board.color_count)
            .map(|_| ColorItem {
                id: new_id(rng),
                value: random_color(rng),
                locked: false,
            })
            .collect();
        let glyphs = random_emoji_subset(rng, self.board.emoji_count, &EmojiFilter::default());
        let emojis = glyphs
            .into_iter()
            .map(|glyph| EmojiItem {
                id: new_id(rng),
                glyph: glyph.to_string(),
                locked: false,
            })
            .collect();

        tracing::debug!(%title, "initialised mood");
        MoodState {
            title,
            title_locked: false,
            colors,
            emojis,
        }
    }

    /// Regenerates every unlocked element. Ids are kept so the presentation
    /// layer can diff; locked elements are returned untouched and ignore the
    /// filter.
    pub fn shuffle(&mut self, mood: &MoodState, filter: &EmojiFilter) -> MoodState {
        let rng = &mut self.rng;
        let title = if mood.title_locked {
            mood.title.clone()
        } else {
            random_title(rng)
        };

        let colors = mood
            .colors
            .iter()
            .map(|color| {
                if color.locked {
                    color.clone()
                } else {
                    ColorItem {
                        value: random_color(rng),
                        ..color.clone()
                    }
                }
            })
            .collect();

        let emojis = mood
            .emojis
            .iter()
            .map(|emoji| {
                if emoji.locked {
                    return emoji.clone();
                }
                match random_emoji_subset(rng, 1, filter).first() {
                    Some(glyph) => EmojiItem {
                        glyph: glyph.to_string(),
                        ..emoji.clone()
                    },
                    None => emoji.clone(),
                }
            })
            .collect();

        tracing::debug!(%title, ?filter, "shuffled mood");
        MoodState {
            title,
            title_locked: mood.title_locked,
            colors,
            emojis,
        }
    }
}

/// Flips the lock on exactly one element.
pub fn toggle_lock(mood: &MoodState, target: &LockTarget) -> Result<MoodState> {
    let mut next = mood.clone();
    match target {
        LockTarget::Title => next.title_locked = !next.title_locked,
        LockTarget::Color(id) => {
            let color = next
                .colors
                .iter_mut()
                .find(|color| &color.id == id)
                .ok_or_else(|| MoodboardError::UnknownElement { id: id.clone() })?;
            color.locked = !color.locked;
        }
        LockTarget::Emoji(id) => {
            let emoji = next
                .emojis
                .iter_mut()
                .find(|emoji| &emoji.id == id)
                .ok_or_else(|| MoodboardError::UnknownElement { id: id.clone() })?;
            emoji.locked = !emoji.locked;
        }
    }
    Ok(next)
}

/// Moves the element at `from` to `to`, shifting the ones in between.
pub fn reorder(mood: &MoodState, list: ListKind, from: usize, to: usize) -> Result<MoodState> {
    let mut next = mood.clone();
    match list {
        ListKind::Colors => move_item(&mut next.colors, list, from, to)?,
        ListKind::Emojis => move_item(&mut next.emojis, list, from, to)?,
    }
    Ok(next)
}

fn move_item<T>(items: &mut Vec<T>, list: ListKind, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(MoodboardError::IndexOutOfRange {
                list: list.as_str(),
                index,
                len,
            });
        }
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Clears every lock without touching values.
pub fn reset_locks(mood: &MoodState) -> MoodState {
    let mut next = mood.clone();
    next.title_locked = false;
    next.colors.iter_mut().for_each(|color| color.locked = false);
    next.emojis.iter_mut().for_each(|emoji| emoji.locked = false);
    next
}
