use super::types::ModelList;
use crate::types::{ModelDescriptor, SambaNovaConfig};
use crate::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;

/// HTTP client for the SambaNova API.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct SambaNovaClient {
    client: Client,
    config: SambaNovaConfig,
    extra_headers: HeaderMap,
}

impl SambaNovaClient {
    /// Create a new client.
    ///
    /// No client-wide timeout is set: streamed completions may run for as
    /// long as the server keeps sending.
    pub fn new(config: SambaNovaConfig) -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Self::with_client(client, config)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: SambaNovaConfig) -> Result<Self, Error> {
        let mut extra_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::config(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("invalid value for header '{name}': {e}")))?;
            extra_headers.append(name, value);
        }

        Ok(Self {
            client,
            config,
            extra_headers,
        })
    }

    pub fn config(&self) -> &SambaNovaConfig {
        &self.config
    }

    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    /// List the models available to `api_key`, in the order the API returns them.
    pub async fn list_models(&self, api_key: &str) -> Result<Vec<ModelDescriptor>, Error> {
        let response = self
            .client
            .get(self.config.endpoint("models"))
            .header(AUTHORIZATION, bearer(api_key)?)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.discovery_timeout)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.bytes().await?;
        let list: ModelList = serde_json::from_slice(&body)?;

        Ok(list.data)
    }

    /// POST a JSON body to `path` and return the response once its status
    /// is known to be successful. The body is left unread.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        api_key: &str,
        body: &T,
    ) -> Result<Response, Error> {
        let url = self.config.endpoint(path);
        tracing::debug!(url = %url, "sending SambaNova request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, bearer(api_key)?)
            .headers(self.extra_headers.clone())
            .json(body)
            .send()
            .await?;

        check_status(response).await
    }
}

fn bearer(api_key: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| Error::config("API key contains characters not allowed in a header"))?;
    value.set_sensitive(true);
    Ok(value)
}

async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => format!("http status {}", status.as_u16()),
        Err(e) => format!(
            "http status {}; failed to read response body: {e}",
            status.as_u16()
        ),
    };

    Err(Error::api(status.as_u16(), message))
}
