//! Slainte chat widget.
//!
//! A server-rendered chat widget: a text input that grows with its content,
//! an auto-scrolling message list, markdown rendering of assistant replies,
//! and loading/error indicators.
//!
//! # Architecture
//!
//! - **Server**: Axum routes serving the page and HTMX fragments
//! - **UI**: Leptos SSR components with HTMX + Alpine.js attributes
//! - **Replies**: pluggable [`responder::Responder`] streaming text deltas
//!
//! # Modules
//!
//! - [`chat`]: messages, input rules, conversation state
//! - [`responder`]: reply sources
//! - [`ui`]: components and page rendering
//! - [`server`]: router and handlers

#![allow(clippy::default_trait_access)]

pub mod chat;
pub mod config;
pub mod error;
pub mod responder;
pub mod server;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use chat::ConversationStore;
use responder::Responder;
use ui::RenderSettings;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Conversations by id.
    pub conversations: ConversationStore,
    /// Source of assistant replies.
    pub responder: Arc<dyn Responder>,
    /// Page and fragment render settings.
    pub render: Arc<RenderSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(responder: Arc<dyn Responder>, render: RenderSettings) -> Self {
        Self {
            conversations: ConversationStore::new(),
            responder,
            render: Arc::new(render),
        }
    }
}
