//! Model discovery via `GET /models`.

use crate::{Error, ModelDescriptor, SambaNovaClient};

/// List the models available to `api_key`, reporting any failure.
pub async fn try_discover(
    client: &SambaNovaClient,
    api_key: &str,
) -> Result<Vec<ModelDescriptor>, Error> {
    client.list_models(api_key).await
}

/// List the available models, or nothing.
///
/// A missing key, a failed request and an unexpected payload all produce an
/// empty list with a warning, so callers cannot tell "no models" from
/// "discovery failed". Without a key no request is made.
pub async fn discover(client: &SambaNovaClient, api_key: Option<&str>) -> Vec<ModelDescriptor> {
    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        tracing::warn!("no SambaNova API key found, returning empty model list");
        return Vec::new();
    };

    match try_discover(client, api_key).await {
        Ok(models) => {
            tracing::debug!(count = models.len(), "discovered SambaNova models");
            models
        }
        Err(error) => {
            tracing::warn!(%error, "failed to fetch models from SambaNova API");
            Vec::new()
        }
    }
}
