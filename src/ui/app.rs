//! Page shell.

use leptos::prelude::*;

use crate::chat::{Autosize, ConversationSnapshot};
use crate::ui::LOGO_SRC;
use crate::ui::chat::ChatWidget;

/// Full page: document head, static header, and the mounted chat widget.
#[component]
pub fn App(
    /// Title shown in the header and the document title.
    #[prop(into)]
    title: String,
    /// Conversation the widget is bound to.
    conversation: ConversationSnapshot,
    /// Polling period while a reply is loading.
    #[prop(default = 500)]
    poll_interval_ms: u64,
    /// Height policy for the input.
    #[prop(default = Autosize::default())]
    autosize: Autosize,
) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title.clone()}</title>

                // Local scripts only (no CDN)
                <script src="/static/vendor/htmx.min.js"></script>
                <script defer src="/static/vendor/alpine.min.js"></script>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>

            <body class="min-h-screen bg-white text-black antialiased">
                <div class="flex flex-col min-h-full w-full max-w-3xl mx-auto px-4">
                    <Header title=title />
                    <ChatWidget
                        conversation=conversation
                        poll_interval_ms=poll_interval_ms
                        autosize=autosize
                    />
                </div>
            </body>
        </html>
    }
}

/// Sticky header with logo and title.
#[component]
fn Header(title: String) -> impl IntoView {
    view! {
        <header class="sticky top-0 shrink-0 z-20 bg-white">
            <div class="flex flex-col h-full w-full gap-1 pt-4 pb-2">
                <img src=LOGO_SRC alt="logo" class="w-20 h-20 mx-auto" />
                <h1 class="text-[1.65rem] font-semibold text-center">{title}</h1>
            </div>
        </header>
    }
}

/// 404 page for unknown conversations.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <title>"Not found"</title>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>
            <body class="min-h-screen bg-white text-black antialiased">
                <div class="flex flex-col items-center justify-center py-20">
                    <h1 class="text-4xl font-bold mb-4">"404"</h1>
                    <p class="mb-6">"This conversation does not exist."</p>
                    <a href="/" class="px-4 py-2 rounded-xl bg-primary text-white">"Start a new chat"</a>
                </div>
            </body>
        </html>
    }
}
