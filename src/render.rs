//! The reply-rendering pipeline.
//!
//! [`format_ai_message`] sequences the passes from the other modules into
//! one string-in/string-out function. The stage order is significant and
//! must not change:
//!
//! 1. Pre-clean leaked markup fragments ([`crate::cleanup`])
//! 2. Extract `[text](url)` links ([`crate::links`]) — before escaping, so
//!    the synthesized anchors survive
//! 3. Escape everything except those anchors
//! 4. Rewrite blank-line pairs into paragraph markers and remaining
//!    newlines into `<br>`
//! 5. Promote heading lines, then apply bold/italic spans
//! 6. Group list and table blocks ([`crate::block`])
//! 7. Collapse degenerate paragraph pairs, ensure a paragraph container,
//!    and wrap the whole reply in the response container
//!
//! Every stage consumes the previous stage's full output; nothing is
//! streamed. The function is total: malformed markdown degrades to literal
//! text and no input panics.

use crate::block;
use crate::cleanup;
use crate::escape::escape_html;
use crate::inline;
use crate::links;

pub(crate) const PARAGRAPH_OPEN: &str = "<p class=\"ai-paragraph\">";
pub(crate) const PARAGRAPH_BREAK: &str = "</p><p class=\"ai-paragraph\">";

/// Format an AI reply as a safe HTML message bubble.
///
/// The result is wrapped in a single `<div class="ai-response">` container
/// and contains no unescaped occurrence of the input's HTML metacharacters
/// outside the anchors synthesized for markdown links. The empty string
/// formats to the empty string.
///
/// # Examples
///
/// ```
/// use flowmark::format_ai_message;
///
/// assert_eq!(
///     format_ai_message("**Hello**"),
///     "<div class=\"ai-response\"><p class=\"ai-paragraph\">\
///      <strong class=\"ai-bold\">Hello</strong></p></div>"
/// );
/// ```
pub fn format_ai_message(message: &str) -> String {
    if message.is_empty() {
        return String::new();
    }

    let cleaned = cleanup::pre_clean(message);
    let linked = links::extract_links(&cleaned);
    let escaped = links::escape_except_links(&linked);
    let marked = convert_breaks(&escaped);
    let headed = block::promote_headings(&marked);
    let styled = inline::apply_emphasis(&headed);
    let blocked = block::detect_blocks(&styled);
    let collapsed = cleanup::collapse_empty_paragraphs(&blocked);
    let body = ensure_paragraph(cleanup::strip_stray_edges(&collapsed));

    format!("<div class=\"ai-response\">{body}</div>")
}

/// Escape a user-authored message for direct insertion into a bubble.
///
/// User text gets no markdown treatment and no container; it is entity
/// escaping only.
pub fn format_user_message(message: &str) -> String {
    escape_html(message)
}

/// Blank-line pairs become paragraph boundaries, single newlines `<br>`.
fn convert_breaks(text: &str) -> String {
    text.replace("\n\n", PARAGRAPH_BREAK).replace('\n', "<br>")
}

fn ensure_paragraph(text: &str) -> String {
    if text.contains(PARAGRAPH_OPEN) {
        text.to_string()
    } else {
        format!("{PARAGRAPH_OPEN}{text}</p>")
    }
}
