//! Rendering of buffered pipe-delimited rows.

/// Render accumulated table rows: row 0 becomes the header, the rest the
/// body. Rows keep exactly the cells they arrived with; ragged rows are not
/// padded or truncated. An empty row sequence renders to an empty string.
pub fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut html = String::from("<table class=\"ai-table\">");

    html.push_str("<thead><tr>");
    for cell in &rows[0] {
        html.push_str("<th class=\"ai-table-header\">");
        html.push_str(cell);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>");

    if rows.len() > 1 {
        html.push_str("<tbody>");
        for row in &rows[1..] {
            html.push_str("<tr>");
            for cell in row {
                html.push_str("<td class=\"ai-table-cell\">");
                html.push_str(cell);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody>");
    }

    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_rows_render_to_empty_string() {
        assert_eq!(render_table(&[]), "");
    }

    #[test]
    fn test_header_only() {
        let html = render_table(&rows(&[&["A", "B"]]));
        assert_eq!(
            html,
            "<table class=\"ai-table\"><thead><tr>\
             <th class=\"ai-table-header\">A</th>\
             <th class=\"ai-table-header\">B</th>\
             </tr></thead></table>"
        );
    }

    #[test]
    fn test_header_and_body() {
        let html = render_table(&rows(&[&["A", "B"], &["1", "2"]]));
        assert!(html.contains("<thead><tr><th class=\"ai-table-header\">A</th>"));
        assert!(html.contains("<tbody><tr><td class=\"ai-table-cell\">1</td>"));
        assert!(html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_ragged_rows_keep_their_cells() {
        let html = render_table(&rows(&[&["A"], &["1", "2", "3"]]));
        assert_eq!(html.matches("<th").count(), 1);
        assert_eq!(html.matches("<td").count(), 3);
    }
}
