//! Conversation state owned by the widget's parent, and the store holding it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::input::ChatInputDelegate;
use super::message::{Message, Role};

/// Length of generated conversation ids.
const ID_LEN: usize = 8;

/// One widget instance: its messages, loading flag and draft text.
///
/// Cloning yields another handle to the same conversation.
#[derive(Debug, Clone)]
pub struct Conversation {
    inner: Arc<ConversationInner>,
}

#[derive(Debug)]
struct ConversationInner {
    id: String,
    state: RwLock<ConversationState>,
}

#[derive(Debug)]
struct ConversationState {
    messages: Vec<Message>,
    is_loading: bool,
    new_message: String,
    last_activity: DateTime<Utc>,
    remote_chat_id: Option<String>,
}

/// Point-in-time copy used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSnapshot {
    pub id: String,
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub new_message: String,
}

impl Conversation {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(ConversationInner {
                id,
                state: RwLock::new(ConversationState {
                    messages: Vec::new(),
                    is_loading: false,
                    new_message: String::new(),
                    last_activity: now,
                    remote_chat_id: None,
                }),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ConversationState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConversationState> {
        let mut guard = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        guard.last_activity = Utc::now();
        guard
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Replace the draft text.
    pub fn set_new_message(&self, text: impl Into<String>) {
        self.write().new_message = text.into();
    }

    /// Submit the draft.
    ///
    /// Does nothing and returns `None` while a reply is in flight or when the
    /// draft is blank. Otherwise appends the user turn and a pending assistant
    /// turn, clears the draft, and returns the submitted text.
    pub fn submit_new_message(&self) -> Option<String> {
        let mut state = self.write();
        if state.is_loading || state.new_message.trim().is_empty() {
            return None;
        }

        let prompt = std::mem::take(&mut state.new_message);
        state.messages.push(Message::user(prompt.clone()));
        state.messages.push(Message::pending_assistant());
        state.is_loading = true;
        Some(prompt)
    }

    /// Append streamed text to the pending assistant turn.
    ///
    /// Returns `false` when no reply is pending.
    pub fn append_reply(&self, delta: &str) -> bool {
        let mut state = self.write();
        match pending_reply(&mut state.messages) {
            Some(msg) => {
                msg.content.push_str(delta);
                true
            }
            None => false,
        }
    }

    /// Mark the pending reply complete.
    pub fn finish_reply(&self) {
        let mut state = self.write();
        if let Some(msg) = pending_reply(&mut state.messages) {
            msg.loading = false;
        }
        state.is_loading = false;
    }

    /// Mark the pending reply failed. Text streamed so far is kept.
    pub fn fail_reply(&self) {
        let mut state = self.write();
        if let Some(msg) = pending_reply(&mut state.messages) {
            msg.loading = false;
            msg.error = true;
        }
        state.is_loading = false;
    }

    /// Conversation id on the reply service, once one has been opened.
    #[must_use]
    pub fn remote_chat_id(&self) -> Option<String> {
        self.read().remote_chat_id.clone()
    }

    pub fn set_remote_chat_id(&self, id: impl Into<String>) {
        self.write().remote_chat_id = Some(id.into());
    }

    /// Forget the remote chat, e.g. after the service no longer knows it.
    pub fn clear_remote_chat_id(&self) {
        self.write().remote_chat_id = None;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.read().messages.len()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        let state = self.read();
        ConversationSnapshot {
            id: self.inner.id.clone(),
            messages: state.messages.clone(),
            is_loading: state.is_loading,
            new_message: state.new_message.clone(),
        }
    }

    /// Check if the conversation has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = self.read().last_activity;
        // A negative span means the clock went backwards; treat as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

fn pending_reply(messages: &mut [Message]) -> Option<&mut Message> {
    messages
        .last_mut()
        .filter(|m| m.role == Role::Assistant && m.loading)
}

/// [`ChatInputDelegate`] that writes into a conversation and remembers what
/// was submitted.
#[derive(Debug)]
pub struct InputSink<'a> {
    conversation: &'a Conversation,
    submitted: Option<String>,
}

impl<'a> InputSink<'a> {
    #[must_use]
    pub fn new(conversation: &'a Conversation) -> Self {
        Self {
            conversation,
            submitted: None,
        }
    }

    /// Text accepted by the last submit, if any.
    #[must_use]
    pub fn into_submitted(self) -> Option<String> {
        self.submitted
    }
}

impl ChatInputDelegate for InputSink<'_> {
    fn set_new_message(&mut self, text: String) {
        self.conversation.set_new_message(text);
    }

    fn submit_new_message(&mut self) {
        self.submitted = self.conversation.submit_new_message();
    }
}

/// Thread-safe store for conversations.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation with a fresh short id.
    #[must_use]
    pub fn create(&self) -> Conversation {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        loop {
            let mut id = Uuid::new_v4().simple().to_string();
            id.truncate(ID_LEN);
            if !guard.contains_key(&id) {
                let conversation = Conversation::new(id.clone());
                guard.insert(id, conversation.clone());
                return conversation;
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove conversations idle longer than `timeout`.
    ///
    /// Conversations with a reply in flight are kept. Returns the number
    /// removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, c| c.is_loading() || !c.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
