//! Reusable UI building blocks, rendered via Leptos SSR.
//!
//! - [`Avatar`]: round participant image
//! - [`Spinner`]: pending-content indicator
//! - icons: inline SVG icons

mod avatar;
mod icons;
mod spinner;

pub use avatar::Avatar;
pub use icons::{ErrorIcon, LoaderIcon, SendIcon};
pub use spinner::Spinner;
