//! Markdown to HTML for assistant replies.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// URL schemes a link or image may use. Scheme-less URLs are always allowed.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "irc", "ircs", "xmpp"];

/// Render markdown content to HTML using pulldown-cmark.
///
/// Raw HTML blocks and inline HTML in the source are escaped and shown as
/// text. Link and image targets with a scheme outside [`SAFE_SCHEMES`]
/// (`javascript:`, `data:`, ...) are emptied, so a reply can never inject
/// markup or script into the page.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html_output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

/// Empty `url` unless it is relative, a fragment, or uses a safe scheme.
///
/// A colon only introduces a scheme when it comes before any `/`, `?` or `#`.
fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    let safe = match url.find(':') {
        None => true,
        Some(colon) => {
            let head = &(*url)[..colon];
            head.contains(['/', '?', '#'])
                || SAFE_SCHEMES
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(head.trim()))
        }
    };
    if safe { url } else { CowStr::Borrowed("") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("# Title\n\n**bold** and *em*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>em</em>"));
    }

    #[test]
    fn renders_lists_and_tables() {
        let html = render_markdown("- one\n- two\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn escapes_raw_html() {
        let html = render_markdown("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn strips_script_links() {
        let html = render_markdown("[click me](javascript:alert(document.cookie))");
        assert!(!html.contains("javascript"));
        assert!(html.contains("<a href=\"\">click me</a>"));

        let html = render_markdown("[x](JavaScript:alert(1)) ![y](data:text/html;base64,AAAA)");
        assert!(!html.to_lowercase().contains("javascript"));
        assert!(!html.contains("data:"));
    }

    #[test]
    fn keeps_safe_links() {
        let html = render_markdown(
            "[a](https://example.com/x?y=1) [b](mailto:help@example.com) [c](/docs/a:b) [d](#top) [e](notes.md)",
        );
        assert!(html.contains("href=\"https://example.com/x?y=1\""));
        assert!(html.contains("href=\"mailto:help@example.com\""));
        assert!(html.contains("href=\"/docs/a:b\""));
        assert!(html.contains("href=\"#top\""));
        assert!(html.contains("href=\"notes.md\""));
    }

    #[test]
    fn escapes_html_blocks() {
        let html = render_markdown("<div onclick=\"x()\">boom</div>\n");
        assert!(!html.contains("<div"));
    }
}
