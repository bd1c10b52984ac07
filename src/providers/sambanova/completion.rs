use super::types::{CompletionChunk, CompletionRequest, CompletionResponse};
use super::{SambaNovaClient, PROVIDER_NAME};
use crate::provider::Model;
use crate::sse_stream::SseStreamExt;
use crate::{Conversation, Error, KeyRequirement, ModelKind, Prompt, Response, SAMBANOVA_KEY};
use std::fmt;

/// Suffix that tells completion models apart from chat models in the registry.
pub const COMPLETION_SUFFIX: &str = "-completion";

/// A SambaNova model driven through the text-completion endpoint.
#[derive(Debug, Clone)]
pub struct SambaNovaCompletion {
    model_id: String,
    model_name: String,
    client: SambaNovaClient,
}

impl SambaNovaCompletion {
    pub fn new(
        model_id: impl Into<String>,
        model_name: impl Into<String>,
        client: SambaNovaClient,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            model_name: model_name.into(),
            client,
        }
    }

    pub fn api_base(&self) -> &str {
        self.client.api_base()
    }

    /// Flatten earlier turns and the new prompt into one newline-joined string.
    pub fn build_prompt(prompt: &Prompt, conversation: Option<&Conversation>) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if let Some(conversation) = conversation {
            for turn in conversation.turns() {
                parts.push(&turn.prompt);
                parts.push(&turn.response);
            }
        }
        parts.push(&prompt.prompt);

        parts.join("\n")
    }

    /// Build the request body for `prompt`.
    pub fn build_request<'a>(
        &'a self,
        prompt: &'a Prompt,
        conversation: Option<&Conversation>,
        stream: bool,
    ) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model_name,
            prompt: Self::build_prompt(prompt, conversation),
            stream,
            options: &prompt.options,
        }
    }
}

#[async_trait::async_trait]
impl Model for SambaNovaCompletion {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Completion
    }

    fn key_requirement(&self) -> KeyRequirement {
        SAMBANOVA_KEY
    }

    async fn execute(
        &self,
        prompt: &Prompt,
        conversation: Option<&Conversation>,
        stream: bool,
        api_key: &str,
    ) -> Result<Response, Error> {
        let request = self.build_request(prompt, conversation, stream);
        let response = self.client.post("completions", api_key, &request).await?;

        if stream {
            let fragments = Box::pin(response.bytes_stream()).text_fragments::<CompletionChunk>();
            return Ok(Response::from_stream(fragments));
        }

        let body = response.bytes().await?;
        let completion: CompletionResponse = serde_json::from_slice(&body)?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider(PROVIDER_NAME, "response contained no choices"))?;

        Ok(Response::from_text(choice.text.unwrap_or_default()))
    }
}

impl fmt::Display for SambaNovaCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PROVIDER_NAME}: {}", self.model_id)
    }
}
