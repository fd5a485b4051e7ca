use std::path::PathBuf;

use clap::{Parser, Subcommand};
use moodboard_core::{
    AppConfig, EmojiCategory, EmojiFilter, HistoryStore, JsonFileStorage, MoodEngine, MoodState,
    MoodboardError, SavedMood,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

mod play;

fn main() -> moodboard_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(path) = cli.history_file {
        config.history.path = path;
    }

    match cli.command {
        Commands::New {
            seed,
            category,
            search,
            json,
        } => run_new(&config, seed, &category, search, json),
        Commands::Play { seed, export_dir } => play::run(&config, rng(seed), export_dir),
        Commands::History { action } => run_history(&config, action),
    }
}

fn run_new(
    config: &AppConfig,
    seed: Option<u64>,
    category: &str,
    search: Option<String>,
    json: bool,
) -> moodboard_core::Result<()> {
    let filter = EmojiFilter::new(
        EmojiCategory::parse_selector(category)?,
        search.unwrap_or_default(),
    );
    tracing::info!(seed, ?filter, "generating mood");

    let mut engine = MoodEngine::new(rng(seed), config.board.clone());
    let mut mood = engine.initialize();
    if !filter.is_unrestricted() {
        mood = engine.shuffle(&mood, &filter);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&mood)?);
    } else {
        print!("{}", render_mood(&mood));
    }
    Ok(())
}

fn run_history(config: &AppConfig, action: HistoryAction) -> moodboard_core::Result<()> {
    let storage = JsonFileStorage::new(&config.history.path);
    let mut store = HistoryStore::load(storage, config.history.capacity);

    match action {
        HistoryAction::List => {
            if store.is_empty() {
                println!("no saved moods in {}", config.history.path.display());
            }
            for (index, entry) in store.entries().iter().enumerate() {
                println!("{}", render_entry(index, entry));
            }
        }
        HistoryAction::Show { id } => {
            let mood = store
                .restore(&id)
                .ok_or_else(|| MoodboardError::msg(format!("no saved mood `{id}`")))?;
            print!("{}", render_mood(&mood));
        }
        HistoryAction::Delete { id } => {
            if store.delete(&id) {
                println!("deleted {id}");
            } else {
                println!("no saved mood `{id}`");
            }
        }
        HistoryAction::Clear => {
            store.clear();
            println!("history cleared");
        }
    }
    Ok(())
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Multi-line text rendering of a mood. Locked elements carry a `*`.
pub(crate) fn render_mood(mood: &MoodState) -> String {
    let lock = |locked: bool| if locked { "*" } else { "" };
    let mut out = format!("\"{}\"{}\n", mood.title, lock(mood.title_locked));

    out.push_str("colors:");
    for (index, color) in mood.colors.iter().enumerate() {
        out.push_str(&format!(
            " {}:{}{}",
            index + 1,
            color.value.to_hex(),
            lock(color.locked)
        ));
    }
    out.push_str("\nemojis:");
    for (index, emoji) in mood.emojis.iter().enumerate() {
        out.push_str(&format!(" {}:{}{}", index + 1, emoji.glyph, lock(emoji.locked)));
    }
    out.push('\n');
    out
}

pub(crate) fn render_entry(index: usize, entry: &SavedMood) -> String {
    let glyphs: String = entry.mood.emojis.iter().map(|e| e.glyph.as_str()).collect();
    format!(
        "{:>2}. {} \"{}\" {} ({})",
        index + 1,
        entry.id,
        entry.mood.title,
        glyphs,
        entry.created_at.format("%Y-%m-%d %H:%M")
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Random moodboard generator", long_about = None)]
struct Cli {
    /// JSON configuration file. Missing files fall back to defaults.
    #[arg(short, long, global = true, default_value = "moodboard.json")]
    config: PathBuf,
    /// Overrides the history file from the configuration.
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one freshly generated mood.
    New {
        /// Seed for reproducible output.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Emoji category (`all`, `faces`, `animals`, `food`, `nature`, `vibes`).
        #[arg(long, default_value = "all")]
        category: String,
        /// Only draw emojis whose glyph, keywords or category contain this term.
        #[arg(long)]
        search: Option<String>,
        /// Print the mood as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive session reading commands from stdin.
    Play {
        #[arg(short, long)]
        seed: Option<u64>,
        /// Directory export manifests are written to.
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },
    /// Inspect or edit the saved-mood history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List saved moods, newest first.
    List,
    /// Print one saved mood.
    Show { id: String },
    /// Remove one saved mood.
    Delete { id: String },
    /// Remove every saved mood.
    Clear,
}
