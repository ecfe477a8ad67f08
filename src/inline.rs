//! Bold and italic span conversion.

/// Convert `**bold**` then `*italic*` spans.
///
/// The double-asterisk pass runs first so a bold span is never half-consumed
/// by the italic pass. Delimiters without a matching partner stay literal.
pub(crate) fn apply_emphasis(text: &str) -> String {
    let bold = replace_delimited(text, "**", "<strong class=\"ai-bold\">", "</strong>");
    replace_delimited(&bold, "*", "<em class=\"ai-italic\">", "</em>")
}

/// Replace non-overlapping `delim…delim` pairs, left to right, with the
/// nearest closing delimiter ending each span.
fn replace_delimited(text: &str, delim: &str, open: &str, close: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(delim) {
        let start = pos + rel;
        let body = start + delim.len();
        match text[body..].find(delim) {
            Some(len) => {
                result.push_str(&text[pos..start]);
                result.push_str(open);
                result.push_str(&text[body..body + len]);
                result.push_str(close);
                pos = body + len + delim.len();
            }
            None => {
                // Unpaired delimiter stays literal.
                result.push_str(&text[pos..body]);
                pos = body;
            }
        }
    }

    result.push_str(&text[pos..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(
            apply_emphasis("**bold**"),
            "<strong class=\"ai-bold\">bold</strong>"
        );
    }

    #[test]
    fn test_italic() {
        assert_eq!(apply_emphasis("*it*"), "<em class=\"ai-italic\">it</em>");
    }

    #[test]
    fn test_bold_then_italic_in_one_line() {
        assert_eq!(
            apply_emphasis("**b** and *i*"),
            "<strong class=\"ai-bold\">b</strong> and <em class=\"ai-italic\">i</em>"
        );
    }

    #[test]
    fn test_single_star_stays_literal() {
        assert_eq!(apply_emphasis("a * b"), "a * b");
    }

    #[test]
    fn test_leftover_double_star_pairs_as_empty_italic() {
        // A `**` the bold pass could not pair is two adjacent single stars
        // to the italic pass.
        assert_eq!(
            apply_emphasis("**open"),
            "<em class=\"ai-italic\"></em>open"
        );
    }

    #[test]
    fn test_pairs_are_non_overlapping() {
        assert_eq!(
            apply_emphasis("a**b**c**d"),
            "a<strong class=\"ai-bold\">b</strong>c<em class=\"ai-italic\"></em>d"
        );
    }

    #[test]
    fn test_empty_bold_body() {
        assert_eq!(apply_emphasis("****"), "<strong class=\"ai-bold\"></strong>");
    }
}
