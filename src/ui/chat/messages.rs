//! Chat message list.

use leptos::prelude::*;

use crate::chat::{Message, MessageBody, Role, render_markdown};
use crate::ui::components::{Avatar, ErrorIcon, Spinner};
use crate::ui::LOGO_SRC;

/// Text of the per-message failure notice.
pub const ERROR_TEXT: &str = "Error generating the response";

/// Keeps the newest message in view while a reply streams in, and once more
/// when a finished reply is rendered that the page has not scrolled to yet.
const AUTO_SCROLL: &str = "const settled = $el.dataset.settledReply; \
                           if ($el.dataset.autoscroll === 'true' || (settled && window.chatScrolledReply !== settled)) { \
                           window.chatScrolledReply = settled; \
                           $nextTick(() => $el.lastElementChild?.scrollIntoView({ block: 'end' })) }";

/// Read-only list of chat turns.
#[component]
pub fn ChatMessages(
    /// Messages in display order.
    messages: Vec<Message>,
    /// A reply is in flight.
    #[prop(default = false)]
    is_loading: bool,
) -> impl IntoView {
    // Position of the last assistant reply once it has finished.
    let settled_reply = (!is_loading
        && messages.last().is_some_and(|m| m.role == Role::Assistant))
    .then(|| messages.len().to_string());

    let rows = messages
        .into_iter()
        .map(|message| view! { <MessageRow message=message /> })
        .collect_view();

    let autoscroll = if is_loading { "true" } else { "false" };

    view! {
        <div class="chat-messages bg-white p-4 rounded-xl">
            <div
                class="grow space-y-4"
                aria-live="polite"
                aria-label="Chat messages"
                data-autoscroll=autoscroll
                data-settled-reply=settled_reply
                x-init=AUTO_SCROLL
            >
                {rows}
            </div>
        </div>
    }
}

/// One chat turn: avatar, bubble, and optional error notice.
#[component]
fn MessageRow(message: Message) -> impl IntoView {
    let is_user = message.role == Role::User;

    let row_classes = format!(
        "message message-{} flex items-end gap-4 {}",
        message.role.as_str(),
        if is_user { "justify-end" } else { "" }
    );
    let bubble_classes = if is_user {
        "py-4 px-3 rounded-xl w-fit bg-userBubble text-black max-w-[50%] ml-auto"
    } else {
        "py-4 px-3 rounded-xl w-fit bg-primary text-white max-w-[80%]"
    };

    let body = match message.body() {
        MessageBody::Spinner => view! { <Spinner /> }.into_any(),
        MessageBody::Markdown(text) => {
            let html = render_markdown(text);
            view! { <div class="markdown-body" inner_html=html></div> }.into_any()
        }
        MessageBody::Plain(text) => {
            let text = text.to_string();
            view! { <div class="whitespace-pre-line">{text}</div> }.into_any()
        }
    };

    let notice = message.error.then(|| {
        let classes = format!(
            "message-error flex items-center gap-1 text-sm text-errorRed {}",
            if message.error_badge_spaced() { "mt-2" } else { "" }
        );
        view! {
            <div class=classes>
                <ErrorIcon class="h-5 w-5" />
                <span>{ERROR_TEXT}</span>
            </div>
        }
    });

    view! {
        <div class=row_classes>
            {(!is_user).then(|| view! {
                <Avatar src=LOGO_SRC alt="Assistant" size="h-[40px] w-[40px]" />
            })}
            <div class=bubble_classes>
                <div class="markdown-container">{body}</div>
                {notice}
            </div>
        </div>
    }
}
