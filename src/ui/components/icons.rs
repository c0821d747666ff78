//! Inline SVG icons.

use leptos::prelude::*;

/// Stroke-style 24x24 frame shared by every icon.
///
/// Icons without a `label` are hidden from assistive technology.
#[component]
fn Svg(class: String, #[prop(optional)] label: Option<&'static str>, children: Children) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
            role=label.map(|_| "img")
            aria-label=label
            aria-hidden=label.is_none().then_some("true")
        >
            {children()}
        </svg>
    }
}

/// Paper plane on the send button.
#[component]
pub fn SendIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <Svg class=class.to_string()>
            <line x1="22" y1="2" x2="11" y2="13" />
            <polygon points="22 2 15 22 11 13 2 9 22 2" />
        </Svg>
    }
}

#[component]
pub fn LoaderIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <Svg class=format!("{class} animate-spin")>
            <path d="M21 12a9 9 0 1 1-6.219-8.56" />
        </Svg>
    }
}

/// Circled exclamation mark for failed replies.
#[component]
pub fn ErrorIcon(#[prop(default = "h-4 w-4")] class: &'static str) -> impl IntoView {
    view! {
        <Svg class=class.to_string() label="error">
            <circle cx="12" cy="12" r="10" />
            <line x1="12" y1="8" x2="12" y2="12" />
            <line x1="12" y1="16" x2="12.01" y2="16" />
        </Svg>
    }
}
