//! Reply sources for the assistant side of the conversation.
//!
//! The widget does not produce answers itself. A [`Responder`] opens a chat
//! on some reply service and streams text deltas back; [`relay_reply`] pours
//! those deltas into the pending assistant turn of a [`Conversation`].
//!
//! - [`HttpResponder`]: remote chat service speaking JSON + server-sent events
//! - [`StaticResponder`]: fixed reply, used without a configured service

mod fixed;
mod http;
mod sse;

pub use fixed::StaticResponder;
pub use http::HttpResponder;

use std::pin::Pin;

use futures::{Stream, StreamExt};

use crate::chat::Conversation;
use crate::error::ResponderError;

/// Stream of reply text deltas.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String, ResponderError>> + Send>>;

/// Produces assistant replies.
#[async_trait::async_trait]
pub trait Responder: Send + Sync + std::fmt::Debug {
    /// Open a chat on the reply service and return its id.
    async fn open_chat(&self) -> Result<String, ResponderError>;

    /// Send `message` to chat `chat_id` and stream the reply.
    async fn stream_reply(&self, chat_id: &str, message: &str)
    -> Result<ReplyStream, ResponderError>;
}

/// Stream the reply to `prompt` into `conversation`.
///
/// Opens a remote chat the first time the conversation needs one. If the
/// service no longer knows that chat, a new one is opened and the message
/// sent once more. Any other failure flags the pending turn as errored.
pub async fn relay_reply(responder: &dyn Responder, conversation: &Conversation, prompt: &str) {
    match relay(responder, conversation, prompt).await {
        Ok(deltas) => {
            tracing::info!(
                conversation_id = %conversation.id(),
                deltas,
                "Reply complete"
            );
            conversation.finish_reply();
        }
        Err(e) => {
            tracing::warn!(
                conversation_id = %conversation.id(),
                error = %e,
                "Reply failed"
            );
            conversation.fail_reply();
        }
    }
}

async fn relay(
    responder: &dyn Responder,
    conversation: &Conversation,
    prompt: &str,
) -> Result<usize, ResponderError> {
    let mut chat_id = match conversation.remote_chat_id() {
        Some(id) => id,
        None => open_remote_chat(responder, conversation).await?,
    };

    let first = responder.stream_reply(&chat_id, prompt).await;
    let mut stream = match first {
        Err(ResponderError::ChatNotFound(stale)) => {
            tracing::info!(
                conversation_id = %conversation.id(),
                chat_id = %stale,
                "Remote chat gone, opening a new one"
            );
            conversation.clear_remote_chat_id();
            chat_id = open_remote_chat(responder, conversation).await?;
            responder.stream_reply(&chat_id, prompt).await?
        }
        other => other?,
    };

    let mut deltas = 0;
    while let Some(delta) = stream.next().await {
        let delta = delta?;
        tracing::trace!(chat_id = %chat_id, delta_length = delta.len(), "Reply delta");
        if !conversation.append_reply(&delta) {
            // Conversation no longer waits for this reply.
            break;
        }
        deltas += 1;
    }
    Ok(deltas)
}

async fn open_remote_chat(
    responder: &dyn Responder,
    conversation: &Conversation,
) -> Result<String, ResponderError> {
    let id = responder.open_chat().await?;
    tracing::debug!(
        conversation_id = %conversation.id(),
        chat_id = %id,
        "Opened remote chat"
    );
    conversation.set_remote_chat_id(id.clone());
    Ok(id)
}
