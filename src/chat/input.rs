//! Rules behind the chat input box.
//!
//! The input is controlled: its text and what happens on submit belong to
//! the caller, reached through [`ChatInputDelegate`]. [`ChatInputModel`]
//! holds the two props the input renders from and decides when a key press
//! or a click turns into a submission.

/// Key name reported for the Enter key.
pub const ENTER: &str = "Enter";

/// Default upper bound for the auto-grown textarea, in pixels.
pub const DEFAULT_MAX_INPUT_HEIGHT: u32 = 140;

/// Callbacks the owner of the input state supplies.
pub trait ChatInputDelegate {
    /// Replace the draft text. Called on every keystroke.
    fn set_new_message(&mut self, text: String);

    /// Submit the current draft.
    fn submit_new_message(&mut self);
}

/// A key press as seen by the textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress<'a> {
    /// DOM key name (`"Enter"`, `"a"`, ...).
    pub key: &'a str,
    /// Shift was held.
    pub shift: bool,
}

impl<'a> KeyPress<'a> {
    /// Plain key press without modifiers.
    #[must_use]
    pub fn new(key: &'a str) -> Self {
        Self { key, shift: false }
    }

    /// Key press with Shift held.
    #[must_use]
    pub fn with_shift(key: &'a str) -> Self {
        Self { key, shift: true }
    }

    fn is_submit_chord(self) -> bool {
        self.key == ENTER && !self.shift
    }
}

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDownOutcome {
    /// The browser default (newline insertion) must be suppressed.
    pub prevent_default: bool,
    /// The delegate was asked to submit.
    pub submitted: bool,
}

/// Props the input renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatInputModel<'a> {
    /// Current draft text.
    pub new_message: &'a str,
    /// A reply is in flight.
    pub is_loading: bool,
}

impl<'a> ChatInputModel<'a> {
    #[must_use]
    pub fn new(new_message: &'a str, is_loading: bool) -> Self {
        Self {
            new_message,
            is_loading,
        }
    }

    /// Draft has something besides whitespace.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.new_message.trim().is_empty()
    }

    /// The send button cannot be used.
    #[must_use]
    pub fn is_send_disabled(&self) -> bool {
        self.is_loading || !self.has_text()
    }

    /// Forward an edit to the owner.
    pub fn on_change<D: ChatInputDelegate + ?Sized>(&self, value: impl Into<String>, delegate: &mut D) {
        delegate.set_new_message(value.into());
    }

    /// Handle a key press in the textarea.
    ///
    /// Enter without Shift while idle never inserts a newline; it submits
    /// only when the draft has text. Everything else is left to the browser.
    pub fn on_key_down<D: ChatInputDelegate + ?Sized>(
        &self,
        key: KeyPress<'_>,
        delegate: &mut D,
    ) -> KeyDownOutcome {
        if !key.is_submit_chord() || self.is_loading {
            return KeyDownOutcome::default();
        }

        let submitted = self.has_text();
        if submitted {
            delegate.submit_new_message();
        }

        KeyDownOutcome {
            prevent_default: true,
            submitted,
        }
    }

    /// Handle a click on the send button. Returns whether it submitted.
    pub fn on_send_click<D: ChatInputDelegate + ?Sized>(&self, delegate: &mut D) -> bool {
        if self.is_send_disabled() {
            return false;
        }
        delegate.submit_new_message();
        true
    }
}

/// Height policy for the auto-growing textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autosize {
    /// Ceiling in pixels; content beyond it scrolls.
    pub max_height: u32,
    /// Pixel height of one text line.
    pub line_height: u32,
}

impl Default for Autosize {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_INPUT_HEIGHT,
            line_height: 24,
        }
    }
}

impl Autosize {
    #[must_use]
    pub fn with_max_height(max_height: u32) -> Self {
        Self {
            max_height,
            ..Self::default()
        }
    }

    /// Row count the textarea starts with for `text`, capped by the ceiling.
    #[must_use]
    pub fn initial_rows(&self, text: &str) -> u32 {
        // A trailing newline starts a visible empty row.
        let lines = u32::try_from(text.split('\n').count()).unwrap_or(u32::MAX);
        let max_rows = (self.max_height / self.line_height.max(1)).max(1);
        lines.min(max_rows)
    }

    /// Client-side expression that resizes the element on input.
    #[must_use]
    pub fn client_expression(&self) -> String {
        format!(
            "$el.style.height = 'auto'; $el.style.height = Math.min($el.scrollHeight, {}) + 'px'",
            self.max_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        drafts: Vec<String>,
        submits: usize,
    }

    impl ChatInputDelegate for Recorder {
        fn set_new_message(&mut self, text: String) {
            self.drafts.push(text);
        }

        fn submit_new_message(&mut self) {
            self.submits += 1;
        }
    }

    #[test]
    fn enter_submits_once_when_idle() {
        let mut rec = Recorder::default();
        let model = ChatInputModel::new("hello", false);

        let outcome = model.on_key_down(KeyPress::new(ENTER), &mut rec);

        assert_eq!(rec.submits, 1);
        assert!(outcome.prevent_default);
        assert!(outcome.submitted);
    }

    #[test]
    fn enter_while_loading_does_nothing() {
        let mut rec = Recorder::default();
        let model = ChatInputModel::new("hello", true);

        let outcome = model.on_key_down(KeyPress::new(ENTER), &mut rec);

        assert_eq!(rec.submits, 0);
        assert_eq!(outcome, KeyDownOutcome::default());
    }

    #[test]
    fn shift_enter_keeps_newline() {
        let mut rec = Recorder::default();
        let model = ChatInputModel::new("hello", false);

        let outcome = model.on_key_down(KeyPress::with_shift(ENTER), &mut rec);

        assert_eq!(rec.submits, 0);
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn enter_on_blank_draft_swallows_newline_without_submitting() {
        let mut rec = Recorder::default();
        let model = ChatInputModel::new("  \n\t", false);

        let outcome = model.on_key_down(KeyPress::new(ENTER), &mut rec);

        assert_eq!(rec.submits, 0);
        assert!(outcome.prevent_default);
        assert!(!outcome.submitted);
    }

    #[test]
    fn other_keys_pass_through() {
        let mut rec = Recorder::default();
        let model = ChatInputModel::new("hello", false);

        assert_eq!(
            model.on_key_down(KeyPress::new("a"), &mut rec),
            KeyDownOutcome::default()
        );
        assert_eq!(rec.submits, 0);
    }

    #[test]
    fn send_disabled_while_loading_regardless_of_text() {
        assert!(ChatInputModel::new("hello", true).is_send_disabled());
        assert!(ChatInputModel::new("", true).is_send_disabled());
        assert!(ChatInputModel::new("   ", false).is_send_disabled());
        assert!(!ChatInputModel::new("hi", false).is_send_disabled());
    }

    #[test]
    fn send_click_respects_disabled_state() {
        let mut rec = Recorder::default();
        assert!(!ChatInputModel::new("hi", true).on_send_click(&mut rec));
        assert!(!ChatInputModel::new(" ", false).on_send_click(&mut rec));
        assert_eq!(rec.submits, 0);

        assert!(ChatInputModel::new("hi", false).on_send_click(&mut rec));
        assert_eq!(rec.submits, 1);
    }

    #[test]
    fn change_forwards_every_value() {
        let mut rec = Recorder::default();
        let model = ChatInputModel::new("", false);
        model.on_change("h", &mut rec);
        model.on_change("he", &mut rec);
        assert_eq!(rec.drafts, vec!["h", "he"]);
    }

    #[test]
    fn autosize_caps_rows() {
        let sizing = Autosize::default();
        assert_eq!(sizing.initial_rows(""), 1);
        assert_eq!(sizing.initial_rows("a\nb\nc"), 3);
        assert_eq!(sizing.initial_rows("a\n"), 2);
        assert_eq!(sizing.initial_rows(&"x\n".repeat(50)), 140 / 24);
        assert!(sizing.client_expression().contains("140"));
    }
}
