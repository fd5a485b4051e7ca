//! Application lifecycle owner: holds the current mood, the active emoji
//! filter and the history, and applies presentation intents to them.

use std::path::PathBuf;

use rand::Rng;

use crate::{
    config::{AppConfig, Theme},
    engine::{self, MoodEngine},
    export::{ExportFormat, ExportGuard, ExportRequest, ImageExporter},
    feedback::{FeedbackEvent, FeedbackSink},
    history::{HistoryStorage, HistoryStore},
    mood::{ListKind, LockTarget, MoodState},
    random::{pool_size, EmojiFilter},
    Result,
};

/// User intent sent by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleLock(LockTarget),
    Reorder {
        list: ListKind,
        from: usize,
        to: usize,
    },
    /// Partial regeneration using the active filter.
    Shuffle,
    /// Full regeneration, discarding every lock.
    Regenerate,
    ResetLocks,
    SetFilter(EmojiFilter),
    Save,
    Restore(String),
    Delete(String),
    ClearHistory,
}

pub struct MoodSession<R, S> {
    engine: MoodEngine<R>,
    current: MoodState,
    filter: EmojiFilter,
    history: HistoryStore<S>,
    feedback: Box<dyn FeedbackSink>,
    export: ExportGuard,
    theme: Theme,
}

impl<R: Rng, S: HistoryStorage> MoodSession<R, S> {
    /// Loads the history from `storage` and generates the first mood.
    pub fn new(
        rng: R,
        storage: S,
        config: &AppConfig,
        feedback: Box<dyn FeedbackSink>,
    ) -> Self {
        let mut engine = MoodEngine::new(rng, config.board.clone());
        let history = HistoryStore::load(storage, config.history.capacity);
        let current = engine.initialize();

        Self {
            engine,
            current,
            filter: EmojiFilter::default(),
            history,
            feedback,
            export: ExportGuard::new(),
            theme: config.theme,
        }
    }

    pub fn current(&self) -> &MoodState {
        &self.current
    }

    pub fn filter(&self) -> &EmojiFilter {
        &self.filter
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.feedback.notify(FeedbackEvent::Click);
        self.theme = theme;
    }

    /// Catalog entries the active filter matches; 0 means emoji draws fall
    /// back to the whole catalog.
    pub fn pool_size(&self) -> usize {
        pool_size(&self.filter)
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_busy()
    }

    /// Applies an intent. Returns `false` when it addressed something that
    /// does not exist and was ignored.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::ToggleLock(target) => self.toggle_lock(&target),
            Intent::Reorder { list, from, to } => self.reorder(list, from, to),
            Intent::Shuffle => {
                self.shuffle();
                true
            }
            Intent::Regenerate => {
                self.regenerate();
                true
            }
            Intent::ResetLocks => {
                self.reset_locks();
                true
            }
            Intent::SetFilter(filter) => {
                self.set_filter(filter);
                true
            }
            Intent::Save => {
                self.save();
                true
            }
            Intent::Restore(id) => self.restore(&id),
            Intent::Delete(id) => self.delete(&id),
            Intent::ClearHistory => {
                self.clear_history();
                true
            }
        }
    }

    pub fn toggle_lock(&mut self, target: &LockTarget) -> bool {
        match engine::toggle_lock(&self.current, target) {
            Ok(next) => {
                let locked = match target {
                    LockTarget::Title => next.title_locked,
                    LockTarget::Color(id) => next.color(id).is_some_and(|c| c.locked),
                    LockTarget::Emoji(id) => next.emoji(id).is_some_and(|e| e.locked),
                };
                self.feedback.notify(if locked {
                    FeedbackEvent::LockPop
                } else {
                    FeedbackEvent::UnlockPop
                });
                self.current = next;
                true
            }
            Err(err) => {
                tracing::warn!(%err, lock_target = ?target, "ignoring lock toggle");
                false
            }
        }
    }

    pub fn reorder(&mut self, list: ListKind, from: usize, to: usize) -> bool {
        match engine::reorder(&self.current, list, from, to) {
            Ok(next) => {
                self.feedback.notify(FeedbackEvent::LockPop);
                self.current = next;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring reorder");
                false
            }
        }
    }

    pub fn shuffle(&mut self) {
        self.feedback.notify(FeedbackEvent::ShuffleChime);
        self.current = self.engine.shuffle(&self.current, &self.filter);
    }

    pub fn regenerate(&mut self) {
        self.feedback.notify(FeedbackEvent::ShuffleChime);
        self.current = self.engine.initialize();
    }

    pub fn reset_locks(&mut self) {
        self.feedback.notify(FeedbackEvent::Click);
        self.current = engine::reset_locks(&self.current);
    }

    /// Changes the filter used by later shuffles. Locked emojis are never
    /// affected.
    pub fn set_filter(&mut self, filter: EmojiFilter) {
        tracing::debug!(?filter, matches = pool_size(&filter), "filter changed");
        self.feedback.notify(FeedbackEvent::Click);
        self.filter = filter;
    }

    /// Saves the current mood and returns the id of the new history entry.
    pub fn save(&mut self) -> String {
        self.feedback.notify(FeedbackEvent::SaveWhoosh);
        self.history.save(&self.current).id
    }

    pub fn restore(&mut self, id: &str) -> bool {
        match self.history.restore(id) {
            Some(mood) => {
                self.feedback.notify(FeedbackEvent::ShuffleChime);
                self.current = mood;
                true
            }
            None => {
                tracing::debug!(id, "no saved mood to restore");
                false
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.feedback.notify(FeedbackEvent::Click);
        self.history.delete(id)
    }

    pub fn clear_history(&mut self) {
        self.feedback.notify(FeedbackEvent::Click);
        self.history.clear();
    }

    /// Marks an export as in flight and snapshots the current board for it.
    /// Fails with [`MoodboardError::ExportBusy`] until [`finish_export`] is
    /// called, so an exporter that completes later can hold the flag.
    ///
    /// [`MoodboardError::ExportBusy`]: crate::MoodboardError::ExportBusy
    /// [`finish_export`]: Self::finish_export
    pub fn begin_export(&mut self, format: ExportFormat) -> Result<ExportRequest> {
        self.export.begin(format)?;
        self.feedback.notify(FeedbackEvent::Click);
        Ok(ExportRequest::new(&self.current, format, self.theme.background()))
    }

    pub fn finish_export(&mut self) {
        self.export.finish();
    }

    /// Runs a synchronous export from start to finish. Failures leave the
    /// session untouched and ready for another attempt.
    pub fn export(
        &mut self,
        exporter: &dyn ImageExporter,
        format: ExportFormat,
    ) -> Result<PathBuf> {
        let request = self.begin_export(format)?;
        let result = exporter.export(&request);
        self.finish_export();

        match &result {
            Ok(path) => tracing::info!(?path, "exported board"),
            Err(err) => tracing::warn!(%err, filename = %request.filename, "export failed"),
        }
        result
    }
}

impl<R, S> std::fmt::Debug for MoodSession<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodSession")
            .field("current", &self.current)
            .field("filter", &self.filter)
            .field("theme", &self.theme)
            .field("exporting", &self.export.is_busy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        feedback::RecordingFeedback,
        history::MemoryStorage,
        library::{lookup, EmojiCategory},
        MoodboardError,
    };

    fn session() -> (MoodSession<StdRng, MemoryStorage>, RecordingFeedback, MemoryStorage) {
        let feedback = RecordingFeedback::new();
        let storage = MemoryStorage::new();
        let session = MoodSession::new(
            StdRng::seed_from_u64(99),
            storage.clone(),
            &AppConfig::default(),
            Box::new(feedback.clone()),
        );
        (session, feedback, storage)
    }

    struct FakeExporter {
        fail: bool,
        seen: RefCell<Vec<ExportRequest>>,
    }

    impl ImageExporter for FakeExporter {
        fn export(&self, request: &ExportRequest) -> Result<PathBuf> {
            self.seen.borrow_mut().push(request.clone());
            if self.fail {
                Err(MoodboardError::Export("canvas unavailable".into()))
            } else {
                Ok(PathBuf::from(&request.filename))
            }
        }
    }

    #[test]
    fn lock_shuffle_scenario() {
        let (mut session, feedback, _) = session();
        let before = session.current().clone();

        assert!(session.dispatch(Intent::ToggleLock(LockTarget::Color(
            before.colors[2].id.clone()
        ))));
        assert!(session.dispatch(Intent::ToggleLock(LockTarget::Emoji(
            before.emojis[0].id.clone()
        ))));
        session.dispatch(Intent::Shuffle);

        let after = session.current();
        assert_eq!(after.colors[2].value, before.colors[2].value);
        assert_eq!(after.emojis[0].glyph, before.emojis[0].glyph);
        for i in [0, 1, 3, 4] {
            assert_eq!(after.colors[i].id, before.colors[i].id);
            assert_ne!(after.colors[i].value, before.colors[i].value);
        }
        for i in 1..6 {
            assert_eq!(after.emojis[i].id, before.emojis[i].id);
        }
        assert_eq!(
            feedback.take().unwrap(),
            vec![
                FeedbackEvent::LockPop,
                FeedbackEvent::LockPop,
                FeedbackEvent::ShuffleChime
            ]
        );
    }

    #[test]
    fn stale_ids_are_ignored() {
        let (mut session, feedback, _) = session();
        let before = session.current().clone();

        assert!(!session.dispatch(Intent::ToggleLock(LockTarget::Emoji("gone".into()))));
        assert!(!session.dispatch(Intent::Reorder {
            list: ListKind::Colors,
            from: 9,
            to: 0,
        }));
        assert!(!session.dispatch(Intent::Restore("gone".into())));

        assert_eq!(session.current(), &before);
        assert!(feedback.events().unwrap().is_empty());
    }

    #[test]
    fn filter_applies_on_next_shuffle() {
        let (mut session, _, _) = session();
        session.dispatch(Intent::SetFilter(EmojiFilter::new(
            Some(EmojiCategory::Animals),
            "",
        )));
        assert_eq!(session.pool_size(), 10);

        session.dispatch(Intent::Shuffle);
        for emoji in &session.current().emojis {
            assert_eq!(lookup(&emoji.glyph).unwrap().category, EmojiCategory::Animals);
        }
    }

    #[test]
    fn save_restore_delete_cycle() {
        let (mut session, feedback, storage) = session();
        let original = session.current().clone();

        session.dispatch(Intent::Save);
        let id = session.history().entries()[0].id.clone();
        session.dispatch(Intent::Shuffle);
        assert!(!session.current().same_content(&original));

        assert!(session.dispatch(Intent::Restore(id.clone())));
        assert_eq!(session.current(), &original);

        assert!(session.dispatch(Intent::Delete(id)));
        assert!(session.history().is_empty());
        assert_eq!(storage.contents().unwrap().as_deref(), Some("[]"));

        let events = feedback.take().unwrap();
        assert_eq!(events[0], FeedbackEvent::SaveWhoosh);
        assert_eq!(events.last(), Some(&FeedbackEvent::Click));
    }

    #[test]
    fn history_survives_a_new_session() {
        let (mut session, _, storage) = session();
        session.save();
        session.save();

        let reopened = MoodSession::new(
            StdRng::seed_from_u64(1),
            storage,
            &AppConfig::default(),
            Box::new(crate::feedback::SilentFeedback),
        );
        assert_eq!(reopened.history().len(), 2);
    }

    #[test]
    fn reorder_pops_like_a_drop() {
        let (mut session, feedback, _) = session();
        let moved = session.current().emojis[5].clone();

        assert!(session.dispatch(Intent::Reorder {
            list: ListKind::Emojis,
            from: 5,
            to: 0,
        }));
        assert_eq!(session.current().emojis[0], moved);
        assert_eq!(feedback.take().unwrap(), vec![FeedbackEvent::LockPop]);
    }

    #[test]
    fn reset_then_regenerate() {
        let (mut session, _, _) = session();
        session.dispatch(Intent::ToggleLock(LockTarget::Title));
        let title = session.current().title.clone();

        session.dispatch(Intent::ResetLocks);
        assert!(!session.current().title_locked);
        assert_eq!(session.current().title, title);

        session.dispatch(Intent::Regenerate);
        assert_eq!(session.current().colors.len(), 5);
        assert_eq!(session.current().emojis.len(), 6);
    }

    #[test]
    fn export_passes_request_and_recovers_from_failure() {
        let (mut session, _, _) = session();
        session.set_theme(Theme::Dark);

        let failing = FakeExporter {
            fail: true,
            seen: RefCell::new(Vec::new()),
        };
        let err = session.export(&failing, ExportFormat::Png).unwrap_err();
        assert!(matches!(err, MoodboardError::Export(_)));
        assert!(!session.is_exporting());

        let working = FakeExporter {
            fail: false,
            seen: RefCell::new(Vec::new()),
        };
        let path = session.export(&working, ExportFormat::Jpeg).unwrap();
        let request = &working.seen.borrow()[0];
        assert_eq!(path, PathBuf::from(&request.filename));
        assert!(request.filename.ends_with(".jpeg"));
        assert_eq!(request.background, "#0f172a");
        assert_eq!(&request.mood, session.current());
    }

    #[test]
    fn pending_export_blocks_a_second_one() {
        let (mut session, _, _) = session();

        let request = session.begin_export(ExportFormat::Png).unwrap();
        assert!(session.is_exporting());
        assert_eq!(&request.mood, session.current());

        let err = session.begin_export(ExportFormat::Jpeg).unwrap_err();
        assert!(matches!(err, MoodboardError::ExportBusy));
        let exporter = FakeExporter {
            fail: false,
            seen: RefCell::new(Vec::new()),
        };
        assert!(matches!(
            session.export(&exporter, ExportFormat::Jpeg),
            Err(MoodboardError::ExportBusy)
        ));
        assert!(exporter.seen.borrow().is_empty());

        session.finish_export();
        assert!(!session.is_exporting());
        assert!(session.export(&exporter, ExportFormat::Jpeg).is_ok());
    }
}
