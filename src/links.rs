//! Markdown link extraction and link-aware escaping.
//!
//! Link extraction runs before HTML escaping so the synthesized anchors
//! survive, and [`escape_except_links`] then escapes everything around them.
//! Only the exact anchor shape produced here is recognized as trusted;
//! anchor-looking text arriving in the raw reply is escaped like any other
//! text.

use memchr::memchr;

use crate::escape::escape_html;

/// Opening of a synthesized anchor, up to the href value.
const ANCHOR_OPEN: &str = "<a href=\"";
/// Fixed attribute run between the href value and the display text.
const ANCHOR_ATTRS: &str = "\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"ai-link\">";
const ANCHOR_CLOSE: &str = "</a>";

/// Convert `[text](url)` spans into anchor markup.
///
/// Matches are non-overlapping and processed left to right. The display text
/// may not contain `]` and the url may not contain `)`; both must be
/// non-empty. Anything that fails to parse is left as literal text. The href
/// value and display text are entity-escaped so the anchor interior never
/// carries raw metacharacters.
pub(crate) fn extract_links(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = memchr(b'[', &bytes[pos..]) {
        let open = pos + rel;
        match parse_link(text, open) {
            Some((label, url, end)) => {
                result.push_str(&text[pos..open]);
                result.push_str(ANCHOR_OPEN);
                result.push_str(&escape_html(url));
                result.push_str(ANCHOR_ATTRS);
                result.push_str(&escape_html(label));
                result.push_str(ANCHOR_CLOSE);
                pos = end;
            }
            None => {
                result.push_str(&text[pos..=open]);
                pos = open + 1;
            }
        }
    }

    result.push_str(&text[pos..]);
    result
}

/// Parse a `[label](url)` span starting at the `[` at byte offset `open`.
/// Returns the label, the url, and the offset just past the closing `)`.
fn parse_link(text: &str, open: usize) -> Option<(&str, &str, usize)> {
    let bytes = text.as_bytes();

    let close = open + 1 + memchr(b']', &bytes[open + 1..])?;
    if close == open + 1 {
        return None;
    }
    if bytes.get(close + 1) != Some(&b'(') {
        return None;
    }

    let url_start = close + 2;
    let url_end = url_start + memchr(b')', &bytes[url_start..])?;
    if url_end == url_start {
        return None;
    }

    Some((&text[open + 1..close], &text[url_start..url_end], url_end + 1))
}

/// Escape all text except the anchors synthesized by [`extract_links`].
///
/// The text is split on anchor boundaries; anchor segments pass through
/// byte-for-byte and every other segment is escaped. A `<a href="` that is
/// not followed by the exact synthesized attribute run does not start an
/// anchor segment.
pub(crate) fn escape_except_links(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(ANCHOR_OPEN) {
        let start = pos + rel;
        match anchor_end(text, start) {
            Some(end) => {
                result.push_str(&escape_html(&text[pos..start]));
                result.push_str(&text[start..end]);
                pos = end;
            }
            None => {
                // False start; escape through it and keep scanning.
                let skip = start + ANCHOR_OPEN.len();
                result.push_str(&escape_html(&text[pos..skip]));
                pos = skip;
            }
        }
    }

    result.push_str(&escape_html(&text[pos..]));
    result
}

/// End offset of the synthesized anchor starting at `start`, if the complete
/// shape (open, attribute run, close) is present.
fn anchor_end(text: &str, start: usize) -> Option<usize> {
    let href = start + ANCHOR_OPEN.len();
    let attrs = href + text[href..].find(ANCHOR_ATTRS)?;
    let label = attrs + ANCHOR_ATTRS.len();
    let close = label + text[label..].find(ANCHOR_CLOSE)?;
    Some(close + ANCHOR_CLOSE.len())
}
