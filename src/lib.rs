//! SambaNova models for an LLM model registry.
//!
//! At load time [`register_models`] lists the models SambaNova offers and
//! registers a chat model (`sambanova/<id>`) and a completion model
//! (`sambanova/<id>-completion`) for each. Invoking a model sends the prompt
//! and earlier conversation turns to the API and returns the output either as
//! a single fragment or as a stream of fragments decoded from the
//! `data: <json>` event stream.

pub mod discovery;
pub mod error;
pub mod keys;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod response;
pub mod sse_stream;
pub mod types;

// Re-export core types for easy usage
pub use discovery::{discover, try_discover};
pub use error::Error;
pub use keys::{resolve_key, EnvKeyStore, KeyStore, MemoryKeyStore};
pub use provider::Model;
pub use providers::*;
pub use registry::{register_all, register_models, ModelRegistry};
pub use response::*;
pub use types::*;
