//! Round participant image.

use leptos::prelude::*;

/// Avatar shown beside assistant messages.
#[component]
pub fn Avatar(
    /// Image source URL.
    src: &'static str,
    #[prop(default = "Avatar")]
    alt: &'static str,
    /// Size classes, e.g. `"h-10 w-10"`.
    #[prop(default = "h-10 w-10")]
    size: &'static str,
) -> impl IntoView {
    let classes = format!("avatar relative flex shrink-0 overflow-hidden rounded-full {size}");

    view! {
        <span class=classes>
            <img class="aspect-square h-full w-full object-contain" src=src alt=alt />
        </span>
    }
}
