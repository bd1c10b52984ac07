#![allow(dead_code)]

use llm_sambanova::{KeyStore, SambaNovaClient, SambaNovaConfig};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-api-key";

/// Client pointed at `server`, which serves the API under `/v1`.
pub fn client_for(server: &MockServer) -> SambaNovaClient {
    SambaNovaClient::new(config_for(server)).expect("Failed to create SambaNova client")
}

pub fn config_for(server: &MockServer) -> SambaNovaConfig {
    SambaNovaConfig::new().with_api_base(format!("{}/v1", server.uri()))
}

/// Key store that never finds a key, regardless of the environment.
pub struct NoKeys;

impl KeyStore for NoKeys {
    fn stored_key(&self, _alias: &str) -> Option<String> {
        None
    }

    fn get_key(&self, _explicit: Option<&str>, _key_name: &str, _env_var: &str) -> Option<String> {
        None
    }
}

/// Encode fragments as a streaming completion body ending in `[DONE]`.
pub fn completion_stream_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        let chunk = serde_json::json!({"choices": [{"text": fragment}]});
        body.push_str(&format!("data: {chunk}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}
