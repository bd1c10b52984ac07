use serde::{Deserialize, Serialize};
use std::fmt;

/// A model identifier as returned by `GET /models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Which vendor endpoint a registered model drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// `POST /chat/completions` with a list of messages.
    Chat,
    /// `POST /completions` with a single prompt string.
    Completion,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Chat => write!(f, "chat"),
            ModelKind::Completion => write!(f, "completion"),
        }
    }
}

/// The credential a model needs: a named key in the host's key store,
/// falling back to an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRequirement {
    pub key_name: &'static str,
    pub env_var: &'static str,
}

/// Credential used by every SambaNova model and by discovery.
pub const SAMBANOVA_KEY: KeyRequirement = KeyRequirement {
    key_name: "sambanova",
    env_var: "SAMBANOVA_KEY",
};
