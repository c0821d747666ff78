//! Responder that always gives the same answer.

use futures::stream;

use super::{ReplyStream, Responder};
use crate::error::ResponderError;

/// Default reply when no reply service is configured.
pub const DEFAULT_STATIC_REPLY: &str =
    "No reply service is configured. Set `responder.base_url` to connect one.";

/// Replies with fixed text, streamed word by word.
#[derive(Debug, Clone)]
pub struct StaticResponder {
    reply: String,
}

impl Default for StaticResponder {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_REPLY)
    }
}

impl StaticResponder {
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait::async_trait]
impl Responder for StaticResponder {
    async fn open_chat(&self) -> Result<String, ResponderError> {
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn stream_reply(
        &self,
        _chat_id: &str,
        _message: &str,
    ) -> Result<ReplyStream, ResponderError> {
        let chunks: Vec<Result<String, ResponderError>> = self
            .reply
            .split_inclusive(' ')
            .map(|w| Ok(w.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn chunks_reassemble_to_reply() {
        let responder = StaticResponder::new("Drink plenty of fluids.");
        let chunks: Vec<String> = responder
            .stream_reply("x", "hi")
            .await
            .unwrap()
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks.concat(), "Drink plenty of fluids.");
    }
}
