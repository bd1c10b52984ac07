//! Types for streaming responses.

use serde::de::DeserializeOwned;

/// One decoded `data:` payload from a streaming response.
///
/// Implementors pick the text fragment out of the chunk, e.g.
/// `choices[0].text` for completions or `choices[0].delta.content` for chat.
pub trait StreamChunk: DeserializeOwned {
    /// The text carried by this chunk, if any.
    fn into_text(self) -> Option<String>;
}

/// What a single line of a streaming body turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A text fragment to hand to the caller.
    Fragment(String),
    /// The `[DONE]` sentinel: stop reading.
    Done,
    /// Nothing to emit for this line.
    Skip,
}
