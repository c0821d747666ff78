//! Loading indicator.

use leptos::prelude::*;

use super::LoaderIcon;

/// Spinner shown in place of content that has not arrived yet.
#[component]
pub fn Spinner(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let classes = format!("spinner inline-flex items-center justify-center {class}");

    view! {
        <span class=classes role="status" aria-label="Loading">
            <LoaderIcon class="h-5 w-5" />
        </span>
    }
}
