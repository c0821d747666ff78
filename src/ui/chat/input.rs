//! Chat input box.

use leptos::prelude::*;

use crate::chat::{Autosize, ChatInputModel};
use crate::ui::components::SendIcon;

/// Controlled chat input.
///
/// The draft lives with the owner; the form posts it to `submit_url` and the
/// response replaces the whole widget. Client-side, Alpine mirrors
/// [`ChatInputModel`]: Enter without Shift submits a non-blank draft unless
/// a reply is loading, and the textarea grows up to `autosize.max_height`.
#[component]
pub fn ChatInput(
    /// Current draft text.
    #[prop(into)]
    new_message: String,
    /// A reply is in flight.
    #[prop(default = false)]
    is_loading: bool,
    /// Where the form posts the draft.
    #[prop(into)]
    submit_url: String,
    /// Height policy for the textarea.
    #[prop(default = Autosize::default())]
    autosize: Autosize,
) -> impl IntoView {
    let model = ChatInputModel::new(&new_message, is_loading);
    let send_disabled = model.is_send_disabled();
    let rows = autosize.initial_rows(&new_message);

    let draft_json = serde_json::to_string(&new_message).unwrap_or_else(|_| "\"\"".to_string());
    let x_data = format!("{{ message: {draft_json}, loading: {is_loading} }}");

    let frame_classes = format!(
        "relative shrink-0 rounded-3xl overflow-hidden ring-primary ring-1 \
         focus-within:ring-2 transition-all {}",
        if is_loading { "opacity-50 pointer-events-none" } else { "" }
    );
    let textarea_style = format!("max-height: {}px", autosize.max_height);
    let button_classes = format!(
        "absolute top-1/2 -translate-y-1/2 right-3 p-1 rounded-md text-primary transition-all {}",
        if send_disabled { "cursor-not-allowed" } else { "" }
    );

    view! {
        <div class="chat-input sticky bottom-0 py-4 z-50">
            <form
                class="p-1.5 rounded-3xl font-mono"
                hx-post=submit_url
                hx-target="#chat-widget"
                hx-swap="outerHTML"
                x-data=x_data
            >
                <div class=frame_classes>
                    <textarea
                        name="message"
                        class="block w-full py-2 px-4 pr-11 rounded-3xl resize-none overflow-y-auto \
                               placeholder:text-primary focus:outline-none focus:ring-0"
                        style=textarea_style
                        rows=rows
                        placeholder="Type a message..."
                        aria-label="Chat input"
                        disabled=is_loading
                        x-model="message"
                        x-on:keydown.enter="if (!$event.shiftKey && !loading) { $event.preventDefault(); if (message.trim()) { $el.form.requestSubmit() } }"
                        x-on:input=autosize.client_expression()
                    >
                        {new_message.clone()}
                    </textarea>
                    <button
                        type="submit"
                        class=button_classes
                        aria-label="Send message"
                        disabled=send_disabled
                        x-bind:disabled="loading || !message.trim()"
                    >
                        <SendIcon class="h-5 w-5" />
                    </button>
                </div>
            </form>
        </div>
    }
}
