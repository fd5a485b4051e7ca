/// Result alias that carries the custom [`MoodboardError`] type.
pub type Result<T> = std::result::Result<T, MoodboardError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum MoodboardError {
    /// Free-form message for conditions that do not warrant their own variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Serialising or parsing persisted JSON failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// A lock toggle addressed an element that is not part of the mood.
    #[error("no element with id `{id}` in the current mood")]
    UnknownElement { id: String },
    /// A reorder addressed a position outside of the list.
    #[error("index {index} is out of range for the {list} list (length {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
    /// A configuration value is outside of what the generator supports.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("unknown emoji category `{0}`")]
    UnknownCategory(String),
    /// Another export is still outstanding.
    #[error("an export is already in progress")]
    ExportBusy,
    /// The export collaborator reported a failure.
    #[error("export failed: {0}")]
    Export(String),
    #[error("{0} has been poisoned")]
    Poisoned(&'static str),
}

impl MoodboardError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for MoodboardError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for MoodboardError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
