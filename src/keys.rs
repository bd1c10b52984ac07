//! Credential lookup.
//!
//! The host owns key storage; this crate only asks for a key by name with an
//! environment-variable fallback.

use crate::{Error, KeyRequirement};
use std::collections::HashMap;
use std::env;

/// Source of API keys.
pub trait KeyStore: Send + Sync {
    /// Look up a key stored under `alias`.
    fn stored_key(&self, alias: &str) -> Option<String>;

    /// Resolve a key.
    ///
    /// 1. A non-empty `explicit` value: the stored key it names, or the value itself.
    /// 2. The key stored under `key_name`.
    /// 3. The `env_var` environment variable.
    fn get_key(&self, explicit: Option<&str>, key_name: &str, env_var: &str) -> Option<String> {
        if let Some(explicit) = explicit.filter(|value| !value.is_empty()) {
            return Some(
                self.stored_key(explicit)
                    .unwrap_or_else(|| explicit.to_string()),
            );
        }

        if let Some(key) = self.stored_key(key_name).filter(|key| !key.is_empty()) {
            return Some(key);
        }

        env::var(env_var).ok().filter(|key| !key.is_empty())
    }
}

/// Key store with no stored keys: environment variables only.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvKeyStore;

impl KeyStore for EnvKeyStore {
    fn stored_key(&self, _alias: &str) -> Option<String> {
        None
    }
}

/// In-memory key store, falling back to environment variables.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    keys: HashMap<String, String>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, alias: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(alias.into(), key.into());
        self
    }

    pub fn set_key(&mut self, alias: impl Into<String>, key: impl Into<String>) {
        self.keys.insert(alias.into(), key.into());
    }
}

impl KeyStore for MemoryKeyStore {
    fn stored_key(&self, alias: &str) -> Option<String> {
        self.keys.get(alias).cloned()
    }
}

/// Resolve the key a model declares it needs.
pub fn resolve_key(
    store: &dyn KeyStore,
    explicit: Option<&str>,
    requirement: KeyRequirement,
) -> Result<String, Error> {
    store
        .get_key(explicit, requirement.key_name, requirement.env_var)
        .ok_or_else(|| Error::MissingKey {
            key_name: requirement.key_name.to_string(),
            env_var: requirement.env_var.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env var names unique to these tests so parallel tests do not collide.
    const UNSET_VAR: &str = "LLM_SAMBANOVA_TEST_UNSET_KEY";

    #[test]
    fn test_explicit_alias_wins() {
        let store = MemoryKeyStore::new()
            .with_key("work", "work-secret")
            .with_key("sambanova", "default-secret");

        assert_eq!(
            store.get_key(Some("work"), "sambanova", UNSET_VAR).as_deref(),
            Some("work-secret")
        );
        assert_eq!(
            store.get_key(Some("literal-key"), "sambanova", UNSET_VAR).as_deref(),
            Some("literal-key")
        );
    }

    #[test]
    fn test_stored_key_before_env() {
        let store = MemoryKeyStore::new().with_key("sambanova", "stored");
        assert_eq!(
            store.get_key(Some(""), "sambanova", UNSET_VAR).as_deref(),
            Some("stored")
        );
    }

    #[test]
    fn test_env_fallback() {
        let var = "LLM_SAMBANOVA_TEST_ENV_FALLBACK";
        env::set_var(var, "from-env");
        assert_eq!(
            EnvKeyStore.get_key(None, "sambanova", var).as_deref(),
            Some("from-env")
        );
        env::remove_var(var);
    }

    #[test]
    fn test_missing_key() {
        let requirement = KeyRequirement {
            key_name: "sambanova",
            env_var: UNSET_VAR,
        };
        let error = resolve_key(&MemoryKeyStore::new(), None, requirement).unwrap_err();
        assert!(matches!(error, Error::MissingKey { .. }));
    }
}
