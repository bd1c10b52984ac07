//! Registering SambaNova models with a host registry.

use crate::discovery::discover;
use crate::keys::KeyStore;
use crate::provider::Model;
use crate::providers::sambanova::{COMPLETION_SUFFIX, MODEL_ID_PREFIX};
use crate::{
    Error, ModelDescriptor, SambaNovaChat, SambaNovaClient, SambaNovaCompletion, SambaNovaConfig,
    SAMBANOVA_KEY,
};

/// Register a chat model and a completion model for every descriptor, in order.
pub fn register_all(
    descriptors: Vec<ModelDescriptor>,
    client: &SambaNovaClient,
    register: &mut dyn FnMut(Box<dyn Model>),
) {
    for descriptor in descriptors {
        let chat = SambaNovaChat::new(
            format!("{MODEL_ID_PREFIX}/{}", descriptor.id),
            descriptor.id.clone(),
            client.clone(),
        );
        register(Box::new(chat));

        let completion = SambaNovaCompletion::new(
            format!("{MODEL_ID_PREFIX}/{}{COMPLETION_SUFFIX}", descriptor.id),
            descriptor.id,
            client.clone(),
        );
        register(Box::new(completion));
    }
}

/// Load-time entry point: discover the available models and register them.
///
/// Registers nothing, and makes no request, when no SambaNova key can be found.
/// Only an invalid `config` is an error; discovery failures are logged and
/// leave the registry untouched.
pub async fn register_models(
    config: &SambaNovaConfig,
    keys: &dyn KeyStore,
    register: &mut dyn FnMut(Box<dyn Model>),
) -> Result<(), Error> {
    let Some(api_key) = keys.get_key(None, SAMBANOVA_KEY.key_name, SAMBANOVA_KEY.env_var) else {
        tracing::debug!("no SambaNova API key set, skipping model registration");
        return Ok(());
    };

    let client = SambaNovaClient::new(config.clone())?;
    let models = discover(&client, Some(&api_key)).await;
    register_all(models, &client, register);

    Ok(())
}

/// A minimal host-side registry of models, keyed by model id.
#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<Box<dyn Model>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model, replacing any model with the same id.
    pub fn register(&mut self, model: Box<dyn Model>) {
        if let Some(existing) = self
            .models
            .iter_mut()
            .find(|existing| existing.model_id() == model.model_id())
        {
            *existing = model;
            return;
        }

        self.models.push(model);
    }

    pub fn get(&self, model_id: &str) -> Option<&dyn Model> {
        self.models
            .iter()
            .find(|model| model.model_id() == model_id)
            .map(|model| model.as_ref())
    }

    /// Registered models in registration order.
    pub fn models(&self) -> impl Iterator<Item = &dyn Model> {
        self.models.iter().map(|model| model.as_ref())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
