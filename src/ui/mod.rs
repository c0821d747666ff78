//! UI components and pages.
//!
//! Leptos components rendered to HTML strings on the server. Interactivity
//! comes from HTMX and Alpine attributes the components emit.
//!
//! - [`app`]: page shell
//! - [`chat`]: chat widget components
//! - [`components`]: small reusable pieces

pub mod app;
pub mod chat;
pub mod components;

use leptos::prelude::*;

use crate::chat::{Autosize, ConversationSnapshot};
use app::{App, NotFoundPage};
use chat::ChatWidget;

/// Logo served from the static directory.
pub const LOGO_SRC: &str = "/static/logo.svg";

/// Render settings shared by every page and fragment.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Header and document title.
    pub title: String,
    /// Polling period while a reply is loading.
    pub poll_interval_ms: u64,
    /// Input height policy.
    pub autosize: Autosize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            title: "Slainte".to_string(),
            poll_interval_ms: 500,
            autosize: Autosize::default(),
        }
    }
}

/// Render a view to an HTML string.
pub fn render_fragment<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(|| view().to_html())
}

/// Render a full document.
pub fn render_page<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    format!("<!DOCTYPE html>{}", render_fragment(view))
}

/// Full chat page for `conversation`.
pub fn render_chat_page(settings: &RenderSettings, conversation: ConversationSnapshot) -> String {
    let RenderSettings {
        title,
        poll_interval_ms,
        autosize,
    } = settings.clone();

    render_page(move || {
        view! {
            <App
                title=title
                conversation=conversation
                poll_interval_ms=poll_interval_ms
                autosize=autosize
            />
        }
    })
}

/// Widget fragment swapped in by HTMX.
pub fn render_widget(settings: &RenderSettings, conversation: ConversationSnapshot) -> String {
    let poll_interval_ms = settings.poll_interval_ms;
    let autosize = settings.autosize;

    render_fragment(move || {
        view! {
            <ChatWidget
                conversation=conversation
                poll_interval_ms=poll_interval_ms
                autosize=autosize
            />
        }
    })
}

/// 404 document.
pub fn render_not_found_page() -> String {
    render_page(|| view! { <NotFoundPage /> })
}
