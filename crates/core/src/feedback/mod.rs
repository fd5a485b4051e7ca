use std::sync::{Arc, Mutex, MutexGuard};

use crate::{MoodboardError, Result};

/// Sound cue the audio collaborator should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    Click,
    LockPop,
    UnlockPop,
    ShuffleChime,
    SaveWhoosh,
}

/// Fire-and-forget receiver of feedback cues. Has no way to influence the
/// session.
pub trait FeedbackSink {
    fn notify(&self, event: FeedbackEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn notify(&self, _event: FeedbackEvent) {}
}

/// Logs each event at `trace` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn notify(&self, event: FeedbackEvent) {
        tracing::trace!(?event, "feedback");
    }
}

/// Keeps every event in order. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    events: Arc<Mutex<Vec<FeedbackEvent>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Result<Vec<FeedbackEvent>> {
        Ok(self.lock()?.clone())
    }

    /// Returns and forgets the recorded events.
    pub fn take(&self) -> Result<Vec<FeedbackEvent>> {
        Ok(std::mem::take(&mut *self.lock()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<FeedbackEvent>>> {
        self.events
            .lock()
            .map_err(|_| MoodboardError::Poisoned("feedback log"))
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&self, event: FeedbackEvent) {
        match self.lock() {
            Ok(mut events) => events.push(event),
            Err(err) => tracing::warn!(%err, "dropping feedback event"),
        }
    }
}
