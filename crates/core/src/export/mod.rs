use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{mood::MoodState, MoodboardError, Result};

/// Marker carried by decorative UI nodes that must not appear in the
/// rasterised image.
pub const EXCLUSION_MARKER: &str = "export-hide";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = MoodboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            other => Err(MoodboardError::msg(format!(
                "unsupported export format `{other}`"
            ))),
        }
    }
}

/// Download name for a board: `moodboard-<title-slug>.<ext>`, with runs of
/// whitespace collapsed into a single `-`.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let slug = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("moodboard-{slug}.{}", format.extension())
}

/// Everything the export collaborator needs to produce an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub filename: String,
    pub format: ExportFormat,
    pub background: String,
    pub exclusion_marker: &'static str,
    pub mood: MoodState,
}

impl ExportRequest {
    pub fn new(mood: &MoodState, format: ExportFormat, background: impl Into<String>) -> Self {
        Self {
            filename: export_filename(&mood.title, format),
            format,
            background: background.into(),
            exclusion_marker: EXCLUSION_MARKER,
            mood: mood.clone(),
        }
    }
}

/// Rasterises a board. Implemented outside the core.
pub trait ImageExporter {
    /// Produces the image and returns where it was written.
    fn export(&self, request: &ExportRequest) -> Result<PathBuf>;
}

/// Busy flag that rejects a second export while one is outstanding.
#[derive(Debug, Default)]
pub struct ExportGuard {
    in_flight: Option<ExportFormat>,
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, format: ExportFormat) -> Result<()> {
        if self.in_flight.is_some() {
            return Err(MoodboardError::ExportBusy);
        }
        self.in_flight = Some(format);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.in_flight = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Format of the outstanding export, if any.
    pub fn in_flight(&self) -> Option<ExportFormat> {
        self.in_flight
    }
}
