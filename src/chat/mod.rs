//! Chat widget state and rules.
//!
//! - [`Message`]: one chat turn and its render decision ([`MessageBody`])
//! - [`ChatInputModel`]: when key presses and clicks submit the draft
//! - [`Conversation`]: the parent record owning messages, loading flag and draft
//! - [`render_markdown`]: assistant reply formatting

mod conversation;
mod input;
mod markdown;
mod message;

pub use conversation::{Conversation, ConversationSnapshot, ConversationStore, InputSink};
pub use input::{
    Autosize, ChatInputDelegate, ChatInputModel, DEFAULT_MAX_INPUT_HEIGHT, ENTER, KeyDownOutcome,
    KeyPress,
};
pub use markdown::render_markdown;
pub use message::{Message, MessageBody, Role};
