//! Line-oriented grouping of heading, list, and table blocks.
//!
//! These passes run over break-marked text: newlines have already been
//! rewritten into `<br>` markers and blank-line pairs into paragraph
//! markers, so a "line" is the text between any two of those boundaries.
//!
//! Block detection is a single scan with no lookahead. At most one block is
//! open at a time, tracked by [`BlockState`]; entering a different block
//! type or hitting any non-matching line (including an empty one) closes
//! the open block and flushes its buffer. Classification checks the table
//! shape first, so a line that carries both a pipe and a list marker is a
//! table row, never a list item. End of input flushes whatever is open.

use crate::render::{PARAGRAPH_BREAK, PARAGRAPH_OPEN};
use crate::table::render_table;

const LINE_BREAK: &str = "<br>";

/// Which block is currently accumulating lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    None,
    Bullet,
    Numbered,
    Table,
}

/// Promote `## ` and `### ` lines to heading elements.
///
/// Only a marker at the start of a line counts; `##` mid-sentence is plain
/// text. Paragraph markers delimit lines just like `<br>` here, so a heading
/// that follows a blank-line pair is still promoted.
pub(crate) fn promote_headings(text: &str) -> String {
    join_map(text, LINE_BREAK, |segment| {
        join_map(segment, PARAGRAPH_BREAK, promote_line)
    })
}

fn join_map(text: &str, sep: &str, f: impl Fn(&str) -> String) -> String {
    text.split(sep).map(f).collect::<Vec<_>>().join(sep)
}

fn promote_line(line: &str) -> String {
    let trimmed = line.trim_start();
    if let Some(title) = heading_text(trimmed, "###") {
        format!("<h4 class=\"ai-subheader\">{title}</h4>")
    } else if let Some(title) = heading_text(trimmed, "##") {
        format!("<h3 class=\"ai-header\">{title}</h3>")
    } else {
        line.to_string()
    }
}

/// Heading title following `marker`, which must be separated from the title
/// by at least one whitespace character.
fn heading_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if !rest.chars().next()?.is_whitespace() {
        return None;
    }
    let title = rest.trim_start();
    if title.is_empty() { None } else { Some(title) }
}

/// Group bullet, numbered, and table lines into rendered blocks, leaving
/// every other line untouched (trimmed, with empty lines dropped).
pub(crate) fn detect_blocks(text: &str) -> String {
    let mut writer = BlockWriter::new();
    let mut rest = text;
    loop {
        match next_boundary(rest) {
            Some((pos, sep)) => {
                writer.line(&rest[..pos]);
                writer.separator(sep);
                rest = &rest[pos + sep.len()..];
            }
            None => {
                writer.line(rest);
                break;
            }
        }
    }
    writer.finish()
}

/// Position and kind of the next line boundary.
fn next_boundary(text: &str) -> Option<(usize, &'static str)> {
    match (text.find(LINE_BREAK), text.find(PARAGRAPH_BREAK)) {
        (None, None) => None,
        (Some(b), None) => Some((b, LINE_BREAK)),
        (None, Some(p)) => Some((p, PARAGRAPH_BREAK)),
        (Some(b), Some(p)) if b <= p => Some((b, LINE_BREAK)),
        (_, Some(p)) => Some((p, PARAGRAPH_BREAK)),
    }
}

/// Accumulates output plus the buffer of the currently open block.
///
/// Output pieces are joined by the first boundary seen since the previous
/// piece (`<br>` when the pieces come from the same line, as between the
/// items of a flushed list). Boundaries swallowed by a continuing block or
/// a dropped empty line are not re-emitted.
struct BlockWriter {
    out: String,
    sep: Option<&'static str>,
    state: BlockState,
    items: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl BlockWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            sep: None,
            state: BlockState::None,
            items: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn line(&mut self, raw: &str) {
        let line = raw.trim();

        // Table shape is checked first; see the module docs.
        if is_table_row(line) {
            if self.state != BlockState::Table {
                self.close();
                self.state = BlockState::Table;
            }
            if !is_separator_row(line) {
                self.rows.push(split_cells(line));
            }
            return;
        }
        if self.state == BlockState::Table && is_divider_rule(line) {
            return;
        }

        if let Some(item) = bullet_item(line) {
            self.push_item(BlockState::Bullet, item);
            return;
        }
        if let Some(item) = numbered_item(line) {
            self.push_item(BlockState::Numbered, item);
            return;
        }

        self.close();
        if !line.is_empty() {
            self.piece(line);
        }
    }

    fn separator(&mut self, sep: &'static str) {
        self.sep.get_or_insert(sep);
    }

    fn push_item(&mut self, kind: BlockState, item: &str) {
        if self.state != kind {
            self.close();
            self.state = kind;
        }
        self.items.push(item.to_string());
    }

    /// Flush the open block, if any, into its rendered form.
    fn close(&mut self) {
        match self.state {
            BlockState::None => {}
            BlockState::Bullet => self.flush_list("<ul class=\"ai-list\">", "</ul>"),
            BlockState::Numbered => {
                self.flush_list("<ol class=\"ai-numbered-list\">", "</ol>");
            }
            BlockState::Table => {
                let rows = std::mem::take(&mut self.rows);
                self.piece(&render_table(&rows));
            }
        }
        self.state = BlockState::None;
    }

    fn flush_list(&mut self, open: &str, close: &str) {
        self.piece(&format!("</p>{open}{PARAGRAPH_OPEN}"));
        let items = std::mem::take(&mut self.items);
        for item in items {
            self.piece(&format!("<li class=\"ai-list-item\">{item}</li>"));
        }
        self.piece(&format!("</p>{close}{PARAGRAPH_OPEN}"));
    }

    fn piece(&mut self, piece: &str) {
        if self.out.is_empty() {
            self.sep = None;
        } else {
            self.out.push_str(self.sep.take().unwrap_or(LINE_BREAK));
        }
        self.out.push_str(piece);
    }

    fn finish(mut self) -> String {
        self.close();
        self.out
    }
}

fn is_table_row(line: &str) -> bool {
    line.contains('|')
}

/// Markdown header/body separator rows are consumed, not rendered as data.
fn is_separator_row(line: &str) -> bool {
    line.contains("---") || line.contains("===")
}

/// A pipeless run of dashes/equals is still a separator while a table is
/// open, so `A | B` / `---` / `1 | 2` stays a single table.
fn is_divider_rule(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '-' || c == '=' || c.is_whitespace())
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("• ").or_else(|| line.strip_prefix("- "))
}

fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    Some(chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_heading() {
        assert_eq!(
            promote_headings("## Title"),
            "<h3 class=\"ai-header\">Title</h3>"
        );
    }

    #[test]
    fn test_promote_subheading() {
        assert_eq!(
            promote_headings("### Sub"),
            "<h4 class=\"ai-subheader\">Sub</h4>"
        );
    }

    #[test]
    fn test_heading_only_at_line_start() {
        assert_eq!(promote_headings("not a ## heading"), "not a ## heading");
        assert_eq!(promote_headings("####"), "####");
    }

    #[test]
    fn test_heading_after_paragraph_break() {
        let text = "intro</p><p class=\"ai-paragraph\">## Title";
        assert_eq!(
            promote_headings(text),
            "intro</p><p class=\"ai-paragraph\"><h3 class=\"ai-header\">Title</h3>"
        );
    }

    #[test]
    fn test_heading_after_break_marker() {
        assert_eq!(
            promote_headings("a<br>## T"),
            "a<br><h3 class=\"ai-header\">T</h3>"
        );
    }

    #[test]
    fn test_bullet_grouping() {
        assert_eq!(
            detect_blocks("- a<br>- b"),
            "</p><ul class=\"ai-list\"><p class=\"ai-paragraph\"><br>\
             <li class=\"ai-list-item\">a</li><br>\
             <li class=\"ai-list-item\">b</li><br>\
             </p></ul><p class=\"ai-paragraph\">"
        );
    }

    #[test]
    fn test_unicode_bullet_marker() {
        let out = detect_blocks("• first");
        assert!(out.contains("<li class=\"ai-list-item\">first</li>"));
    }

    #[test]
    fn test_numbered_grouping() {
        let out = detect_blocks("1. x<br>2. y");
        assert!(out.contains("<ol class=\"ai-numbered-list\">"));
        assert_eq!(out.matches("<li class=\"ai-list-item\">").count(), 2);
        assert!(out.contains(">x</li>"));
        assert!(out.contains(">y</li>"));
    }

    #[test]
    fn test_plain_line_closes_list() {
        let out = detect_blocks("- a<br>done");
        let close = out.find("</ul>").unwrap();
        let text = out.find("done").unwrap();
        assert!(close < text);
    }

    #[test]
    fn test_switching_list_kind_closes_previous() {
        let out = detect_blocks("- a<br>1. b");
        let ul_close = out.find("</ul>").unwrap();
        let ol_open = out.find("<ol").unwrap();
        assert!(ul_close < ol_open);
    }

    #[test]
    fn test_empty_line_closes_block() {
        let out = detect_blocks("- a<br><br>- b");
        assert_eq!(out.matches("<ul class=\"ai-list\">").count(), 2);
    }

    #[test]
    fn test_paragraph_break_delimits_lines() {
        let out = detect_blocks("intro:</p><p class=\"ai-paragraph\">- a<br>- b");
        assert!(out.starts_with("intro:</p><p class=\"ai-paragraph\"></p><ul class=\"ai-list\">"));
        assert_eq!(out.matches("<li class=\"ai-list-item\">").count(), 2);
    }

    #[test]
    fn test_table_rows_buffered_and_rendered() {
        let out = detect_blocks("A | B<br>1 | 2");
        assert!(out.contains("<th class=\"ai-table-header\">A</th>"));
        assert!(out.contains("<td class=\"ai-table-cell\">1</td>"));
        assert_eq!(out.matches("<table class=\"ai-table\">").count(), 1);
    }

    #[test]
    fn test_separator_row_dropped() {
        let out = detect_blocks("A | B<br>--- | ---<br>1 | 2");
        assert!(!out.contains("---"));
        assert_eq!(out.matches("<tr>").count(), 2);
    }

    #[test]
    fn test_pipeless_divider_inside_table_dropped() {
        let out = detect_blocks("A | B<br>---<br>1 | 2");
        assert!(!out.contains("---"));
        assert_eq!(out.matches("<table class=\"ai-table\">").count(), 1);
        assert!(out.contains("<td class=\"ai-table-cell\">1</td>"));
    }

    #[test]
    fn test_table_wins_over_bullet_marker() {
        let out = detect_blocks("- x | y | z");
        assert!(out.contains("<table class=\"ai-table\">"));
        assert!(!out.contains("<li"));
    }

    #[test]
    fn test_unterminated_table_flushed_at_end() {
        let out = detect_blocks("A | B");
        assert!(out.contains("<th class=\"ai-table-header\">A</th>"));
    }

    #[test]
    fn test_leading_and_trailing_pipes_drop_empty_cells() {
        let out = detect_blocks("| A | B |");
        assert_eq!(out.matches("<th").count(), 2);
    }

    #[test]
    fn test_plain_lines_are_trimmed_and_kept() {
        assert_eq!(detect_blocks("  hello  <br>world"), "hello<br>world");
    }
}
