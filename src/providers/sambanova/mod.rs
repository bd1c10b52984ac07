//! SambaNova provider: HTTP client, wire types and the chat and completion models.

pub mod chat;
pub mod client;
pub mod completion;
pub mod types;

pub use chat::SambaNovaChat;
pub use client::SambaNovaClient;
pub use completion::{SambaNovaCompletion, COMPLETION_SUFFIX};

/// Name used in display strings and error messages.
pub const PROVIDER_NAME: &str = "SambaNova";

/// Prefix of every model identity registered by this crate.
pub const MODEL_ID_PREFIX: &str = "sambanova";
