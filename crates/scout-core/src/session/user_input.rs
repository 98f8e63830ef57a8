//! User input types for session interaction.

/// Represents one user utterance entering the refinement loop.
///
/// Spoken input is transcribed before it joins the same path as typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Text the user typed directly.
    Typed(String),
    /// A captured audio clip, transmitted as an opaque binary blob.
    Spoken { audio: Vec<u8> },
}

impl UserInput {
    /// Convenience constructor for typed text.
    pub fn typed(text: impl Into<String>) -> Self {
        Self::Typed(text.into())
    }

    /// Convenience constructor for a recorded clip.
    pub fn spoken(audio: Vec<u8>) -> Self {
        Self::Spoken { audio }
    }

    /// Whether this input came from the voice path.
    pub fn is_spoken(&self) -> bool {
        matches!(self, Self::Spoken { .. })
    }
}
