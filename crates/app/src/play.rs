//! Line-based interactive session. Each input line becomes one intent.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use moodboard_core::{
    lookup, AppConfig, EmojiCategory, EmojiFilter, ExportFormat, ExportRequest, HistoryStorage,
    HistoryStore, ImageExporter, Intent, JsonFileStorage, ListKind, LockTarget, MoodSession,
    MoodState, Theme, TracingFeedback,
};
use rand::Rng;

use crate::{render_entry, render_mood};

const HELP: &str = "\
commands:
  shuffle                    regenerate everything unlocked
  new                        start over with a fresh mood
  lock title|color N|emoji N toggle a lock (1-based positions)
  unlock                     clear every lock
  move colors|emojis A B     move an element from position A to B
  filter CATEGORY [TERM]     set the emoji filter (`all` for any category)
  info N                     show catalog data for emoji N
  save | history             save the mood / list saved moods
  restore N | delete N       restore or delete a saved mood (number or id)
  clear                      delete every saved mood
  theme light|dark           switch the export background
  export png|jpeg            write an export manifest
  show | help | quit";

/// Writes the export request as a JSON manifest that an external rasteriser
/// can pick up.
#[derive(Debug)]
pub(crate) struct ManifestExporter {
    dir: PathBuf,
}

impl ImageExporter for ManifestExporter {
    fn export(&self, request: &ExportRequest) -> moodboard_core::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.json", request.filename));
        std::fs::write(&path, serde_json::to_string_pretty(request)?)?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Apply(Intent),
    Info(usize),
    History,
    Theme(Theme),
    Export(ExportFormat),
    Show,
    Help,
    Quit,
}

pub(crate) fn run<R: Rng>(
    config: &AppConfig,
    rng: R,
    export_dir: PathBuf,
) -> moodboard_core::Result<()> {
    let storage = JsonFileStorage::new(&config.history.path);
    let mut session = MoodSession::new(rng, storage, config, Box::new(TracingFeedback));
    let exporter = ManifestExporter { dir: export_dir };

    println!("{HELP}\n");
    print!("{}", render_mood(session.current()));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line, session.current(), session.history()) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Apply(intent) => {
                let saving = intent == Intent::Save;
                if !session.dispatch(intent) {
                    println!("nothing to do");
                    continue;
                }
                if saving {
                    println!("saved ({} in history)", session.history().len());
                    continue;
                }
                print!("{}", render_mood(session.current()));
                if session.pool_size() == 0 {
                    println!("(filter matches nothing, drawing from every emoji)");
                }
            }
            Command::Info(index) => {
                let glyph = &session.current().emojis[index].glyph;
                match lookup(glyph) {
                    Some(entry) => println!(
                        "{} [{}] #{}",
                        entry.glyph,
                        entry.category,
                        entry.keywords.join(" #")
                    ),
                    None => println!("{glyph} is not in the catalog"),
                }
            }
            Command::History => {
                if session.history().is_empty() {
                    println!("no saved moods");
                }
                for (index, entry) in session.history().entries().iter().enumerate() {
                    println!("{}", render_entry(index, entry));
                }
            }
            Command::Theme(theme) => session.set_theme(theme),
            Command::Export(format) => match session.export(&exporter, format) {
                Ok(path) => println!("exported to {}", path.display()),
                Err(err) => println!("export failed: {err}"),
            },
            Command::Show => print!("{}", render_mood(session.current())),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

/// Turns one input line into a command. Positions are 1-based and resolved
/// against the current mood and history.
pub(crate) fn parse_command<S: HistoryStorage>(
    line: &str,
    mood: &MoodState,
    history: &HistoryStore<S>,
) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["shuffle"] => Command::Apply(Intent::Shuffle),
        ["new"] => Command::Apply(Intent::Regenerate),
        ["unlock"] => Command::Apply(Intent::ResetLocks),
        ["save"] => Command::Apply(Intent::Save),
        ["clear"] => Command::Apply(Intent::ClearHistory),
        ["lock", "title"] => Command::Apply(Intent::ToggleLock(LockTarget::Title)),
        ["lock", "color", n] => {
            let index = position(n, mood.colors.len())?;
            Command::Apply(Intent::ToggleLock(LockTarget::Color(
                mood.colors[index].id.clone(),
            )))
        }
        ["lock", "emoji", n] => {
            let index = position(n, mood.emojis.len())?;
            Command::Apply(Intent::ToggleLock(LockTarget::Emoji(
                mood.emojis[index].id.clone(),
            )))
        }
        ["move", list, from, to] => {
            let (list, len) = match *list {
                "colors" => (ListKind::Colors, mood.colors.len()),
                "emojis" => (ListKind::Emojis, mood.emojis.len()),
                other => return Err(format!("unknown list `{other}`")),
            };
            Command::Apply(Intent::Reorder {
                list,
                from: position(from, len)?,
                to: position(to, len)?,
            })
        }
        ["filter", category, term @ ..] => {
            let category = EmojiCategory::parse_selector(category).map_err(|e| e.to_string())?;
            Command::Apply(Intent::SetFilter(EmojiFilter::new(category, term.join(" "))))
        }
        ["info", n] => Command::Info(position(n, mood.emojis.len())?),
        ["history"] => Command::History,
        ["restore", target] => Command::Apply(Intent::Restore(saved_id(target, history)?)),
        ["delete", target] => Command::Apply(Intent::Delete(saved_id(target, history)?)),
        ["theme", "light"] => Command::Theme(Theme::Light),
        ["theme", "dark"] => Command::Theme(Theme::Dark),
        ["export", format] => Command::Export(format.parse().map_err(|e| format!("{e}"))?),
        ["show"] => Command::Show,
        ["help"] => Command::Help,
        ["quit"] | ["exit"] => Command::Quit,
        _ => return Err(format!("unrecognised command `{}` (try `help`)", line.trim())),
    };
    Ok(command)
}

fn position(raw: &str, len: usize) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(format!("expected a position between 1 and {len}, got `{raw}`")),
    }
}

/// Accepts either a 1-based position in the history list or a saved id.
fn saved_id<S: HistoryStorage>(raw: &str, history: &HistoryStore<S>) -> Result<String, String> {
    if let Ok(n) = raw.parse::<usize>() {
        return history
            .entries()
            .get(n.wrapping_sub(1))
            .map(|entry| entry.id.clone())
            .ok_or_else(|| format!("no saved mood at position {n}"));
    }
    Ok(raw.to_string())
}
