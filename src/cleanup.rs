//! Defensive cleanup around the rendering pipeline.
//!
//! The chat backend occasionally echoes fragments of previously generated
//! markup back into a reply (stray attribute runs, a half-typed tag at the
//! end of a truncated completion). These are stripped before formatting
//! rather than escaped into visible noise. After block detection, the
//! paragraph bookkeeping can leave degenerate open/close pairs behind;
//! those are collapsed here as well.

use memchr::{memchr, memrchr};

use crate::render::{PARAGRAPH_BREAK, PARAGRAPH_OPEN};

/// Attribute fragments known to leak out of the model verbatim.
const LEAKED_FRAGMENTS: [&str; 3] = [
    "target=\"_blank\"",
    "class=\"ai-link\"",
    "rel=\"noopener noreferrer\"",
];

/// Strip leaked attribute fragments and any trailing half-open tag, then
/// trim surrounding whitespace.
pub(crate) fn pre_clean(message: &str) -> String {
    let mut cleaned = message.to_string();
    for needle in LEAKED_FRAGMENTS {
        cleaned = strip_attribute_fragment(&cleaned, needle);
    }
    strip_trailing_partial_tag(&cleaned).trim().to_string()
}

/// Remove every `needle…>` run (plus the whitespace preceding the needle).
/// A needle with no `>` anywhere after it is left in place.
fn strip_attribute_fragment(text: &str, needle: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(needle) {
        let found = pos + rel;
        let after = found + needle.len();
        let Some(gt) = memchr(b'>', &text.as_bytes()[after..]) else {
            break;
        };
        result.push_str(text[pos..found].trim_end());
        pos = after + gt + 1;
    }

    result.push_str(&text[pos..]);
    result
}

/// Drop a trailing `<…` that never closes, as left by a cut-off completion.
fn strip_trailing_partial_tag(text: &str) -> &str {
    let bytes = text.as_bytes();
    let tail = memrchr(b'>', bytes).map_or(0, |i| i + 1);
    match memchr(b'<', &bytes[tail..]) {
        Some(rel) => &text[..tail + rel],
        None => text,
    }
}

/// Collapse `</p><p>…</p>` artifacts left where blocks were inserted next
/// to paragraph boundaries.
pub(crate) fn collapse_empty_paragraphs(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(PARAGRAPH_BREAK) {
        let start = pos + rel;
        let after = start + PARAGRAPH_BREAK.len();
        let body = &text[after..];
        let ws = body.len() - body.trim_start().len();
        if body[ws..].starts_with("</p>") {
            result.push_str(&text[pos..start]);
            result.push_str("</p>");
            pos = after + ws + "</p>".len();
        } else {
            result.push_str(&text[pos..after]);
            pos = after;
        }
    }

    result.push_str(&text[pos..]);
    result
}

/// Strip a stray paragraph-close at the very start and a dangling
/// paragraph-open at the very end.
pub(crate) fn strip_stray_edges(text: &str) -> &str {
    let text = text.strip_prefix("</p>").unwrap_or(text);
    match text.trim_end().strip_suffix(PARAGRAPH_OPEN) {
        Some(stripped) => stripped,
        None => text,
    }
}
