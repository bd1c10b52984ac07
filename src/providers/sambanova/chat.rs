use super::types::{ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse};
use super::{SambaNovaClient, PROVIDER_NAME};
use crate::provider::Model;
use crate::sse_stream::SseStreamExt;
use crate::{
    Conversation, Error, KeyRequirement, Message, ModelKind, Prompt, Response, SAMBANOVA_KEY,
};
use std::fmt;

/// A SambaNova model driven through the chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct SambaNovaChat {
    model_id: String,
    model_name: String,
    client: SambaNovaClient,
}

impl SambaNovaChat {
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

    /// System prompt first, then each earlier turn as a user/assistant pair,
    /// then the new prompt.
    pub fn build_messages(prompt: &Prompt, conversation: Option<&Conversation>) -> Vec<Message> {
        let mut messages = Vec::new();

        if let Some(system) = prompt.system.as_deref().filter(|s| !s.is_empty()) {
            messages.push(Message::system(system));
        }

        if let Some(conversation) = conversation {
            for turn in conversation.turns() {
                messages.push(Message::user(turn.prompt.as_str()));
                messages.push(Message::assistant(turn.response.as_str()));
            }
        }

        messages.push(Message::user(prompt.prompt.as_str()));
        messages
    }

    pub fn build_request<'a>(
        &'a self,
        prompt: &'a Prompt,
        conversation: Option<&Conversation>,
        stream: bool,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model_name,
            messages: Self::build_messages(prompt, conversation),
            stream,
            options: &prompt.options,
        }
    }
}

#[async_trait::async_trait]
impl Model for SambaNovaChat {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Chat
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
        let response = self
            .client
            .post("chat/completions", api_key, &request)
            .await?;

        if stream {
            let fragments =
                Box::pin(response.bytes_stream()).text_fragments::<ChatCompletionChunk>();
            return Ok(Response::from_stream(fragments));
        }

        let body = response.bytes().await?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&body)?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider(PROVIDER_NAME, "response contained no choices"))?;

        Ok(Response::from_text(choice.message.content.unwrap_or_default()))
    }
}

impl fmt::Display for SambaNovaChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PROVIDER_NAME}: {}", self.model_id)
    }
}
