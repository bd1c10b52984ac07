//! Response handling for model invocations.

use crate::Error;
use futures_util::stream::{self, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;

/// Boxed stream of text fragments.
pub type BoxFragmentStream = Pin<Box<dyn Stream<Item = Result<String, Error>> + Send>>;

/// Output of a model invocation, consumed either fragment by fragment or
/// buffered into one string.
///
/// The stream is lazy: each fragment is decoded when the caller asks for it.
/// Dropping a `Response` early closes the underlying HTTP connection.
pub struct Response {
    stream: BoxFragmentStream,
}

impl Response {
    /// Create a new response from a stream of fragments.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<String, Error>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Create a response holding exactly one fragment.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_stream(stream::once(futures_util::future::ready(Ok(text.into()))))
    }

    /// Stream the response fragments.
    pub fn stream(self) -> BoxFragmentStream {
        self.stream
    }

    /// Buffer the entire response by consuming the stream.
    pub async fn text(self) -> Result<String, Error> {
        let mut stream = self.stream;
        let mut text = String::new();

        while let Some(fragment) = stream.next().await {
            text.push_str(&fragment?);
        }

        Ok(text)
    }

    /// Collect every fragment separately.
    pub async fn fragments(self) -> Result<Vec<String>, Error> {
        let mut stream = self.stream;
        let mut fragments = Vec::new();

        while let Some(fragment) = stream.next().await {
            fragments.push(fragment?);
        }

        Ok(fragments)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_text_yields_one_fragment() {
        let fragments = Response::from_text("hi").fragments().await.unwrap();
        assert_eq!(fragments, vec!["hi"]);
    }

    #[tokio::test]
    async fn test_text_concatenates_fragments() {
        let response = Response::from_stream(stream::iter(vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
        ]));
        assert_eq!(response.text().await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_text_propagates_errors() {
        let response = Response::from_stream(stream::iter(vec![
            Ok("partial".to_string()),
            Err(Error::streaming("connection reset")),
        ]));
        assert!(matches!(
            response.text().await,
            Err(Error::Streaming(_))
        ));
    }
}
