//! Chat widget components.
//!
//! [`ChatWidget`] is what the page mounts; it composes [`ChatMessages`] and
//! [`ChatInput`] over one conversation snapshot.

mod input;
mod messages;
mod widget;

pub use input::ChatInput;
pub use messages::{ChatMessages, ERROR_TEXT};
pub use widget::ChatWidget;
