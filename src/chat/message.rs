//! Chat message record and its render decision.

use serde::{Deserialize, Serialize};

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person using the widget.
    User,
    /// Reply produced by the responder.
    Assistant,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One chat turn as rendered by the message list.
///
/// Insertion order of messages is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the turn.
    pub role: Role,
    /// Raw text. Markdown for assistant turns, literal text for user turns.
    pub content: String,
    /// The reply for this turn is still being produced.
    #[serde(default)]
    pub loading: bool,
    /// Producing this turn failed.
    #[serde(default)]
    pub error: bool,
}

impl Message {
    /// A completed user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            loading: false,
            error: false,
        }
    }

    /// A completed assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            loading: false,
            error: false,
        }
    }

    /// An assistant turn whose reply has not arrived yet.
    #[must_use]
    pub fn pending_assistant() -> Self {
        Self {
            loading: true,
            ..Self::assistant("")
        }
    }

    /// Decide what the bubble body shows.
    ///
    /// A loading message with no content yet shows a spinner. Otherwise
    /// assistant text goes through markdown and user text is shown as-is.
    #[must_use]
    pub fn body(&self) -> MessageBody<'_> {
        if self.loading && self.content.is_empty() {
            MessageBody::Spinner
        } else {
            match self.role {
                Role::Assistant => MessageBody::Markdown(&self.content),
                Role::User => MessageBody::Plain(&self.content),
            }
        }
    }

    /// Whether the error badge needs a gap above it.
    #[must_use]
    pub fn error_badge_spaced(&self) -> bool {
        !self.content.is_empty()
    }
}

/// What a message bubble renders as its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBody<'a> {
    /// Reply pending and nothing streamed yet.
    Spinner,
    /// Assistant text rendered as markdown.
    Markdown(&'a str),
    /// User text rendered literally, line breaks preserved.
    Plain(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_assistant_shows_spinner() {
        let msg = Message::pending_assistant();
        assert_eq!(msg.body(), MessageBody::Spinner);
    }

    #[test]
    fn loading_with_partial_content_shows_content() {
        let msg = Message {
            content: "Hel".to_string(),
            ..Message::pending_assistant()
        };
        assert_eq!(msg.body(), MessageBody::Markdown("Hel"));
    }

    #[test]
    fn role_picks_renderer() {
        assert_eq!(
            Message::assistant("**hi**").body(),
            MessageBody::Markdown("**hi**")
        );
        assert_eq!(Message::user("**hi**").body(), MessageBody::Plain("**hi**"));
    }

    #[test]
    fn empty_user_message_is_not_a_spinner() {
        assert_eq!(Message::user("").body(), MessageBody::Plain(""));
    }

    #[test]
    fn error_badge_spacing_follows_content() {
        let mut msg = Message::pending_assistant();
        msg.error = true;
        assert!(!msg.error_badge_spaced());
        msg.content.push_str("partial");
        assert!(msg.error_badge_spaced());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(json.contains("\"role\":\"user\""));

        let back: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"x"}"#).unwrap();
        assert_eq!(back.role, Role::Assistant);
        assert!(!back.loading);
        assert!(!back.error);
    }
}
