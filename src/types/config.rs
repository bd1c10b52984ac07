use crate::Error;
use std::env;
use std::time::Duration;

/// Default SambaNova API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.sambanova.ai/v1";

/// Default timeout for the model-listing call.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration shared by discovery and every registered model.
#[derive(Debug, Clone, PartialEq)]
pub struct SambaNovaConfig {
    /// API base URL, without a trailing slash.
    pub api_base: String,
    /// Timeout applied to `GET /models` only. Completion requests are not
    /// time-limited so long streams are never cut off.
    pub discovery_timeout: Duration,
    /// Extra headers sent with every completion request.
    pub headers: Vec<(String, String)>,
}

impl SambaNovaConfig {
    /// Create a configuration pointing at the public SambaNova API.
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
            headers: Vec::new(),
        }
    }

    /// Use a different API base URL (e.g. a proxy or a mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    /// Add a header to every completion request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Create configuration from environment variables.
    ///
    /// * `SAMBANOVA_API_BASE` overrides the API base URL.
    /// * `SAMBANOVA_DISCOVERY_TIMEOUT_SECS` overrides the discovery timeout.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::new();

        if let Ok(api_base) = env::var("SAMBANOVA_API_BASE") {
            if !api_base.trim().is_empty() {
                config = config.with_api_base(api_base.trim());
            }
        }

        if let Ok(secs) = env::var("SAMBANOVA_DISCOVERY_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!(
                    "SAMBANOVA_DISCOVERY_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            config = config.with_discovery_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Full URL for an API path such as `models` or `chat/completions`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for SambaNovaConfig {
    fn default() -> Self {
        Self::new()
    }
}
