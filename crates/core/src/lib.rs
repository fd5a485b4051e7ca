//! Core library for the Moodboard generator.
//!
//! A mood is a random title, a palette of colors and a row of emojis. Each
//! element can be locked so that shuffles regenerate only what is unlocked.
//! The modules here own the content library, the random primitives, the
//! mutation engine, the saved-mood history and the session that ties them to
//! a presentation layer. Rendering, audio and image encoding are provided by
//! the embedding application through the traits in [`export`] and
//! [`feedback`].

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod feedback;
pub mod history;
pub mod library;
pub mod mood;
pub mod random;
pub mod session;

pub use config::{AppConfig, BoardConfig, HistoryConfig, Theme};
pub use engine::{reorder, reset_locks, toggle_lock, MoodEngine};
pub use error::{MoodboardError, Result};
pub use export::{export_filename, ExportFormat, ExportGuard, ExportRequest, ImageExporter};
pub use feedback::{FeedbackEvent, FeedbackSink, RecordingFeedback, SilentFeedback, TracingFeedback};
pub use history::{HistoryStorage, HistoryStore, JsonFileStorage, MemoryStorage, SavedMood};
pub use library::{lookup, EmojiCatalogEntry, EmojiCategory, EMOJI_CATALOG};
pub use mood::{ColorItem, EmojiItem, Hsl, ListKind, LockTarget, MoodState};
pub use random::{pool_size, random_color, random_emoji_subset, random_title, EmojiFilter};
pub use session::{Intent, MoodSession};
