//! The mounted chat widget: message list plus input.

use leptos::prelude::*;

use super::{ChatInput, ChatMessages};
use crate::chat::{Autosize, ConversationSnapshot};

/// Chat widget bound to one conversation.
///
/// While a reply is loading the widget re-fetches itself every
/// `poll_interval_ms`; the first render after the reply settles carries no
/// trigger, which stops the polling.
#[component]
pub fn ChatWidget(
    /// State to render.
    conversation: ConversationSnapshot,
    /// Polling period while loading.
    #[prop(default = 500)]
    poll_interval_ms: u64,
    /// Height policy for the input.
    #[prop(default = Autosize::default())]
    autosize: Autosize,
) -> impl IntoView {
    let ConversationSnapshot {
        id,
        messages,
        is_loading,
        new_message,
    } = conversation;

    let submit_url = format!("/chat/{id}/messages");
    // Only a loading widget polls; without a trigger htmx would fetch on click.
    let poll_url = is_loading.then(|| format!("/chat/{id}/widget"));
    let trigger = is_loading.then(|| format!("every {poll_interval_ms}ms"));

    view! {
        <section
            id="chat-widget"
            class="chat-widget flex flex-col grow"
            data-conversation-id=id
            hx-get=poll_url
            hx-trigger=trigger
            hx-swap="outerHTML"
        >
            <ChatMessages messages=messages is_loading=is_loading />
            <ChatInput
                new_message=new_message
                is_loading=is_loading
                submit_url=submit_url
                autosize=autosize
            />
        </section>
    }
}
