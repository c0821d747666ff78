use slainte::chat::{Autosize, ConversationSnapshot, Message};
use slainte::ui::chat::{ChatInput, ChatMessages, ERROR_TEXT};
use slainte::ui::{RenderSettings, render_chat_page, render_fragment, render_widget};

use leptos::prelude::*;

fn messages_html(messages: Vec<Message>, is_loading: bool) -> String {
    render_fragment(move || view! { <ChatMessages messages=messages is_loading=is_loading /> })
}

fn input_html(new_message: &str, is_loading: bool) -> String {
    let new_message = new_message.to_string();
    render_fragment(move || {
        view! {
            <ChatInput
                new_message=new_message
                is_loading=is_loading
                submit_url="/chat/abc/messages"
                autosize=Autosize::default()
            />
        }
    })
}

fn snapshot(messages: Vec<Message>, is_loading: bool) -> ConversationSnapshot {
    ConversationSnapshot {
        id: "abc12345".to_string(),
        messages,
        is_loading,
        new_message: String::new(),
    }
}

#[test]
fn test_pending_message_renders_spinner() {
    let html = messages_html(vec![Message::user("hi"), Message::pending_assistant()], true);
    assert!(html.contains("aria-label=\"Loading\""));
    assert!(html.contains("data-autoscroll=\"true\""));
}

#[test]
fn test_finished_reply_is_marked_for_one_more_scroll() {
    let finished = messages_html(vec![Message::user("hi"), Message::assistant("Hello")], false);
    assert!(finished.contains("data-settled-reply=\"2\""));

    let streaming = messages_html(vec![Message::user("hi"), Message::pending_assistant()], true);
    assert!(!streaming.contains("data-settled-reply"));

    let empty = messages_html(Vec::new(), false);
    assert!(!empty.contains("data-settled-reply"));
}

#[test]
fn test_assistant_content_renders_markdown() {
    let html = messages_html(vec![Message::assistant("Take **rest** and fluids")], false);
    assert!(html.contains("<strong>rest</strong>"));
    assert!(!html.contains("aria-label=\"Loading\""));
    assert!(html.contains("data-autoscroll=\"false\""));
}

#[test]
fn test_user_content_renders_literally() {
    let html = messages_html(vec![Message::user("**not bold**\n<b>x</b>")], false);
    assert!(html.contains("**not bold**"));
    assert!(!html.contains("<strong>"));
    assert!(!html.contains("<b>x</b>"));
    assert!(html.contains("whitespace-pre-line"));
    assert!(html.contains("justify-end"));
}

#[test]
fn test_assistant_row_has_avatar_user_row_does_not() {
    let assistant = messages_html(vec![Message::assistant("hello")], false);
    let user = messages_html(vec![Message::user("hello")], false);
    assert!(assistant.contains("/static/logo.svg"));
    assert!(!user.contains("/static/logo.svg"));
}

#[test]
fn test_error_badge_spacing_toggles_with_content() {
    let mut empty = Message::pending_assistant();
    empty.loading = false;
    empty.error = true;
    let html = messages_html(vec![empty], false);
    assert!(html.contains(ERROR_TEXT));
    assert!(!html.contains("mt-2"));

    let mut partial = Message::assistant("Partial answer");
    partial.error = true;
    let html = messages_html(vec![partial], false);
    assert!(html.contains(ERROR_TEXT));
    assert!(html.contains("mt-2"));
}

#[test]
fn test_no_error_badge_without_flag() {
    let html = messages_html(vec![Message::assistant("fine")], false);
    assert!(!html.contains(ERROR_TEXT));
}

#[test]
fn test_messages_render_in_order() {
    let html = messages_html(
        vec![
            Message::user("first question"),
            Message::assistant("first answer"),
            Message::user("second question"),
        ],
        false,
    );
    let a = html.find("first question").unwrap();
    let b = html.find("first answer").unwrap();
    let c = html.find("second question").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_input_carries_draft_and_limits() {
    let html = input_html("draft text", false);
    assert!(html.contains("draft text"));
    assert!(html.contains("aria-label=\"Chat input\""));
    assert!(html.contains("aria-label=\"Send message\""));
    assert!(html.contains("max-height: 140px"));
    assert!(html.contains("hx-post=\"/chat/abc/messages\""));
    assert!(!html.contains("opacity-50"));
}

#[test]
fn test_input_dimmed_while_loading() {
    let html = input_html("draft text", true);
    assert!(html.contains("opacity-50 pointer-events-none"));
    assert!(html.contains("cursor-not-allowed"));
}

#[test]
fn test_blank_input_marks_send_unavailable() {
    let html = input_html("   ", false);
    assert!(html.contains("cursor-not-allowed"));
}

#[test]
fn test_widget_polls_only_while_loading() {
    let settings = RenderSettings::default();

    let idle = render_widget(&settings, snapshot(vec![Message::assistant("done")], false));
    assert!(!idle.contains("hx-trigger"));
    assert!(!idle.contains("hx-get"));

    let busy = render_widget(
        &settings,
        snapshot(vec![Message::user("q"), Message::pending_assistant()], true),
    );
    assert!(busy.contains("hx-trigger=\"every 500ms\""));
    assert!(busy.contains("hx-get=\"/chat/abc12345/widget\""));
}

#[test]
fn test_page_has_header_and_widget() {
    let settings = RenderSettings {
        title: "Slainte".to_string(),
        ..RenderSettings::default()
    };
    let html = render_chat_page(&settings, snapshot(Vec::new(), false));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1"));
    assert!(html.contains("Slainte"));
    assert!(html.contains("id=\"chat-widget\""));
}

/// Marker classes that only name a part of the widget.
const HOOK_CLASSES: &[&str] = &[
    "chat-widget",
    "message",
    "message-user",
    "message-assistant",
    "message-error",
    "markdown-container",
];

fn css_selector(class: &str) -> String {
    let mut selector = String::from(".");
    for c in class.chars() {
        if matches!(c, '[' | ']' | '%' | '/' | '.' | ':') {
            selector.push('\\');
        }
        selector.push(c);
    }
    selector
}

fn defines(css: &str, selector: &str) -> bool {
    css.match_indices(selector).any(|(at, _)| {
        css[at + selector.len()..]
            .chars()
            .next()
            .is_some_and(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
    })
}

#[test]
fn test_stylesheet_defines_every_rendered_class() {
    let css = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/static/app.css")).unwrap();
    let settings = RenderSettings::default();

    let mut failed = Message::assistant("Partial");
    failed.error = true;
    let mut html = render_chat_page(
        &settings,
        snapshot(
            vec![
                Message::user("hi"),
                Message::assistant("**hello**"),
                failed,
                Message::user("again"),
                Message::pending_assistant(),
            ],
            true,
        ),
    );
    html.push_str(&render_widget(&settings, snapshot(Vec::new(), false)));
    html.push_str(&slainte::ui::render_not_found_page());

    let mut missing = Vec::new();
    for (start, _) in html.match_indices("class=\"") {
        let rest = &html[start + 7..];
        let end = rest.find('"').unwrap();
        for class in rest[..end].split_whitespace() {
            if !HOOK_CLASSES.contains(&class) && !defines(&css, &css_selector(class)) {
                missing.push(class.to_string());
            }
        }
    }
    missing.sort();
    missing.dedup();
    assert!(missing.is_empty(), "classes without a rule: {missing:?}");
}
