//! Error types.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Failures talking to the reply service.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// The service does not know the chat id.
    #[error("chat {0} does not exist on the reply service")]
    ChatNotFound(String),
    /// Non-success HTTP status.
    #[error("reply service returned status {0}")]
    Status(reqwest::StatusCode),
    /// The stream carried an error event.
    #[error("reply service reported an error: {0}")]
    Remote(String),
    /// A response body did not have the expected shape.
    #[error("invalid reply service response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid reply service url: {0}")]
    Url(#[from] url::ParseError),
}

/// Failures surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("conversation {0} not found")]
    ConversationNotFound(String),
}

impl IntoResponse for WidgetError {
    fn into_response(self) -> Response {
        match self {
            Self::ConversationNotFound(id) => {
                tracing::debug!(conversation_id = %id, "Conversation not found");
                (
                    StatusCode::NOT_FOUND,
                    Html(crate::ui::render_not_found_page()),
                )
                    .into_response()
            }
        }
    }
}
