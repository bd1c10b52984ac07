use crate::{Conversation, Error, KeyRequirement, ModelKind, Prompt, Response};
use std::fmt;

/// A model that can be registered with a host and invoked later.
///
/// `Display` renders the human-readable name shown by the host.
#[async_trait::async_trait]
pub trait Model: fmt::Display + Send + Sync + 'static {
    /// Identity of this model in the host registry.
    fn model_id(&self) -> &str;

    /// Model name sent to the vendor API.
    fn model_name(&self) -> &str;

    fn kind(&self) -> ModelKind;

    /// The credential this model needs, resolved by the host at call time.
    fn key_requirement(&self) -> KeyRequirement;

    fn can_stream(&self) -> bool {
        true
    }

    /// Run `prompt` after the earlier turns of `conversation`.
    ///
    /// With `stream` set the returned response yields fragments as they
    /// arrive; otherwise it yields the whole completion as one fragment.
    /// A failed request is returned as an error before any fragment exists.
    async fn execute(
        &self,
        prompt: &Prompt,
        conversation: Option<&Conversation>,
        stream: bool,
        api_key: &str,
    ) -> Result<Response, Error>;
}
