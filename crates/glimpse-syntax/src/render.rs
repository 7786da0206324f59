//! Escaping and span-marker rendering.

use crate::Span;

/// Escapes `&`, `<` and `>` for embedding in HTML.
///
/// Quotes are left untouched so that string patterns still see their
/// delimiters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Interleaves `escaped` with `<span class="…">` markers for each span.
///
/// `spans` must be sorted and non-overlapping, as produced by
/// [`crate::Highlighter::classify`]. Text outside spans is copied verbatim.
pub fn render(escaped: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(escaped.len() + spans.len() * 32);
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor || span.end > escaped.len() {
            tracing::warn!(
                "Skipping out-of-order span {}..{} at cursor {}",
                span.start,
                span.end,
                cursor
            );
            continue;
        }
        out.push_str(&escaped[cursor..span.start]);
        out.push_str("<span class=\"");
        out.push_str(span.category.class_name());
        out.push_str("\">");
        out.push_str(&escaped[span.start..span.end]);
        out.push_str("</span>");
        cursor = span.end;
    }

    out.push_str(&escaped[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("\"quoted\" 'too'"), "\"quoted\" 'too'");
    }

    #[test]
    fn test_render_without_spans() {
        assert_eq!(render("plain &lt;text&gt;", &[]), "plain &lt;text&gt;");
    }

    #[test]
    fn test_render_wraps_spans() {
        let spans = vec![
            Span { start: 0, end: 2, text: "if".into(), category: Category::Keyword },
            Span { start: 3, end: 4, text: "1".into(), category: Category::Number },
        ];
        assert_eq!(
            render("if 1;", &spans),
            "<span class=\"keyword\">if</span> <span class=\"number\">1</span>;"
        );
    }
}
