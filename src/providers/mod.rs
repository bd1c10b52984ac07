//! Provider implementations for different LLM services.

pub mod sambanova;

// Re-export commonly used provider types
pub use sambanova::{SambaNovaChat, SambaNovaClient, SambaNovaCompletion};
