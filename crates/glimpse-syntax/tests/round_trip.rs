//! Stripping the span markers from rendered output must give back exactly the
//! escaped input, whatever the language.

use glimpse_syntax::{Highlighter, escape_html};
use proptest::prelude::*;

fn strip_markers(rendered: &str) -> String {
    let mut out = rendered.to_string();
    for class in ["comment", "string", "keyword", "number"] {
        out = out.replace(&format!("<span class=\"{class}\">"), "");
    }
    out.replace("</span>", "")
}

const TAGS: &[&str] = &["js", "py", "css", "md", "xml"];

const FILENAMES: &[&str] = &[
    "a.js", "b.rs", "c.py", "d.rb", "e.html", "f.css", "g.md", "h.txt", "Makefile",
];

proptest! {
    #[test]
    fn rendered_output_strips_to_escaped_input(
        text in r#"[a-z0-9 "'`#/*<>&!:.\-\n]{0,120}"#,
        name in prop::sample::select(FILENAMES),
    ) {
        let highlighter = Highlighter::new().unwrap();
        let rendered = highlighter.highlight(&text, name);
        prop_assert_eq!(strip_markers(&rendered), escape_html(&text));
    }

    #[test]
    fn spans_are_sorted_and_disjoint(
        text in r#"[a-z0-9 "'#/*\n]{0,120}"#,
        tag in prop::sample::select(TAGS),
    ) {
        let highlighter = Highlighter::new().unwrap();
        let classified = highlighter.classify(&text, tag);
        for pair in classified.spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for span in &classified.spans {
            prop_assert!(span.start < span.end);
            prop_assert_eq!(&classified.escaped[span.start..span.end], span.text.as_str());
        }
    }
}

#[test]
fn keyword_inside_string_is_not_highlighted() {
    let highlighter = Highlighter::new().unwrap();
    assert_eq!(
        highlighter.highlight("\"return\"", "x.js"),
        "<span class=\"string\">\"return\"</span>"
    );
}
