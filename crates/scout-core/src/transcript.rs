//! Transcription result model.

use serde::{Deserialize, Serialize};

/// Text produced from one captured audio clip.
///
/// Not persisted by the client beyond immediate use as chat input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Recognized text, possibly empty for silent clips
    pub text: String,
    /// Clip length as reported by the server
    pub duration_seconds: Option<f64>,
    /// Detected language code (e.g. "en")
    pub language: String,
}

impl Transcription {
    /// Whether the recognizer produced any usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
