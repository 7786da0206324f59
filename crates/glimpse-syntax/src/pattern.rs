//! Pattern sets for each language class.
//!
//! All patterns run against HTML-escaped text, so markup delimiters are
//! written as `&lt;` / `&gt;` here rather than `<` / `>`.

use regex::Regex;

use crate::{Category, LanguageClass, Span, SyntaxError};

// ============================================================================
// Keyword sets
// ============================================================================

/// Combined JavaScript/TypeScript, C-family, Go and Rust vocabulary.
fn js_keywords() -> &'static [&'static str] {
    &[
        "const", "let", "var", "function", "return", "if", "else", "for", "while",
        "class", "extends", "import", "export", "from", "default", "async", "await",
        "try", "catch", "throw", "new", "this", "super", "static", "public",
        "private", "protected", "interface", "type", "enum", "implements",
        "package", "struct", "fn", "pub", "mod", "use", "impl", "trait", "where",
        "mut", "ref", "match", "case", "switch", "break", "continue", "void",
        "int", "float", "double", "char", "bool", "boolean", "string", "number",
        "any", "null", "undefined", "true", "false", "nil", "None",
    ]
}

/// Python and Ruby vocabulary.
fn py_keywords() -> &'static [&'static str] {
    &[
        "def", "class", "return", "if", "elif", "else", "for", "while", "import",
        "from", "as", "try", "except", "raise", "with", "in", "is", "not", "and",
        "or", "True", "False", "None", "self", "lambda", "yield", "global",
        "nonlocal", "pass", "break", "continue", "end", "do", "then", "unless",
        "until", "require", "attr_accessor", "attr_reader",
    ]
}

// ============================================================================
// Shared pattern fragments
// ============================================================================

/// One branch per delimiter stands in for a quote back-reference.
const QUOTED_STRING: &str = r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#;
const QUOTED_OR_TEMPLATE_STRING: &str =
    r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`"#;
const BLOCK_COMMENT: &str = r"/\*[\s\S]*?\*/";
const NUMBER: &str = r"\b\d+\.?\d*\b";

fn keyword_alternation(words: &[&str]) -> String {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    format!(r"\b(?:{})\b", alternatives.join("|"))
}

/// A single regular expression tagged with the category it produces.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    /// Capture group whose range becomes the span (0 = whole match).
    group: usize,
    category: Category,
}

impl Matcher {
    fn new(pattern: &str, category: Category) -> Result<Self, regex::Error> {
        Self::with_group(pattern, 0, category)
    }

    fn with_group(pattern: &str, group: usize, category: Category) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            group,
            category,
        })
    }

    /// Returns the category this matcher produces.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Collects every non-empty match in `text`.
    fn find_all(&self, text: &str, out: &mut Vec<(Span, usize)>, rule: usize) {
        for caps in self.regex.captures_iter(text) {
            let Some(m) = caps.get(self.group) else {
                continue;
            };
            if m.start() >= m.end() {
                continue;
            }
            out.push((
                Span {
                    start: m.start(),
                    end: m.end(),
                    text: m.as_str().to_string(),
                    category: self.category,
                },
                rule,
            ));
        }
    }
}

/// The ordered matchers of one language class.
#[derive(Debug, Clone)]
pub struct PatternSet {
    class: LanguageClass,
    matchers: Vec<Matcher>,
}

impl PatternSet {
    /// Compiles the pattern set for a language class.
    pub fn compile(class: LanguageClass) -> Result<Self, SyntaxError> {
        Self::build(class).map_err(|source| SyntaxError::Pattern { class, source })
    }

    fn build(class: LanguageClass) -> Result<Self, regex::Error> {
        let matchers = match class {
            LanguageClass::JsLike => vec![
                Matcher::new(r"(?m)//.*$", Category::Comment)?,
                Matcher::new(BLOCK_COMMENT, Category::Comment)?,
                Matcher::new(QUOTED_OR_TEMPLATE_STRING, Category::String)?,
                Matcher::new(&keyword_alternation(js_keywords()), Category::Keyword)?,
                Matcher::new(NUMBER, Category::Number)?,
            ],
            LanguageClass::PyLike => vec![
                Matcher::new(r"(?m)#.*$", Category::Comment)?,
                Matcher::new(QUOTED_STRING, Category::String)?,
                Matcher::new(&keyword_alternation(py_keywords()), Category::Keyword)?,
                Matcher::new(NUMBER, Category::Number)?,
            ],
            LanguageClass::Markup => vec![
                Matcher::new(r"&lt;!--[\s\S]*?--&gt;", Category::Comment)?,
                Matcher::new(QUOTED_STRING, Category::String)?,
                Matcher::new(r"&lt;/?[\w-]+", Category::Keyword)?,
                Matcher::new(r"&gt;", Category::Keyword)?,
            ],
            LanguageClass::Style => vec![
                Matcher::new(BLOCK_COMMENT, Category::Comment)?,
                Matcher::new(QUOTED_STRING, Category::String)?,
                // Property names: the trailing colon is matched but not highlighted.
                Matcher::with_group(r"([\w-]+)\s*:", 1, Category::Keyword)?,
                Matcher::new(r"#[\da-fA-F]{3,8}\b", Category::Number)?,
            ],
            LanguageClass::Markdown => vec![
                Matcher::new(r"`[^`]+`", Category::String)?,
                Matcher::new(r"(?m)^#{1,6}\s.*$", Category::Keyword)?,
                Matcher::new(r"\*\*.*?\*\*", Category::Keyword)?,
            ],
        };

        Ok(Self { class, matchers })
    }

    /// Returns the language class of this set.
    pub fn class(&self) -> LanguageClass {
        self.class
    }

    /// Returns the matchers in declaration order.
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Runs every matcher over `escaped` and returns all candidate spans,
    /// each tagged with the index of the matcher that produced it.
    ///
    /// Candidates may overlap; see [`crate::Highlighter`] for resolution.
    pub fn candidates(&self, escaped: &str) -> Vec<(Span, usize)> {
        let mut out = Vec::new();
        for (rule, matcher) in self.matchers.iter().enumerate() {
            matcher.find_all(escaped, &mut out, rule);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_classes_compile() {
        for class in LanguageClass::ALL {
            let set = PatternSet::compile(class).unwrap();
            assert_eq!(set.class(), class);
            assert!(!set.matchers().is_empty());
        }
    }

    #[test]
    fn test_keyword_word_boundary() {
        let set = PatternSet::compile(LanguageClass::JsLike).unwrap();
        let candidates = set.candidates("constant = const");
        let keywords: Vec<_> = candidates
            .iter()
            .filter(|(s, _)| s.category == Category::Keyword)
            .map(|(s, _)| (s.start, s.text.as_str()))
            .collect();
        assert_eq!(keywords, vec![(11, "const")]);
    }

    #[test]
    fn test_string_does_not_close_on_other_quote() {
        let set = PatternSet::compile(LanguageClass::JsLike).unwrap();
        let candidates = set.candidates(r#"x = "it's \"fine\"";"#);
        let strings: Vec<_> = candidates
            .iter()
            .filter(|(s, _)| s.category == Category::String)
            .map(|(s, _)| s.text.as_str())
            .collect();
        assert_eq!(strings, vec![r#""it's \"fine\"""#]);
    }

    #[test]
    fn test_unterminated_string_does_not_match() {
        let set = PatternSet::compile(LanguageClass::PyLike).unwrap();
        let candidates = set.candidates("x = 'open");
        assert!(candidates.iter().all(|(s, _)| s.category != Category::String));
    }

    #[test]
    fn test_style_property_excludes_colon() {
        let set = PatternSet::compile(LanguageClass::Style).unwrap();
        let candidates = set.candidates("a { color: #fff; }");
        let keyword = candidates
            .iter()
            .find(|(s, _)| s.category == Category::Keyword)
            .map(|(s, _)| s.text.as_str());
        assert_eq!(keyword, Some("color"));
        assert!(candidates
            .iter()
            .any(|(s, _)| s.category == Category::Number && s.text == "#fff"));
    }

    #[test]
    fn test_numbers_are_plain_decimals() {
        let set = PatternSet::compile(LanguageClass::JsLike).unwrap();
        let numbers: Vec<_> = set
            .candidates("a = 3.14 + 42")
            .into_iter()
            .filter(|(s, _)| s.category == Category::Number)
            .map(|(s, _)| s.text)
            .collect();
        assert_eq!(numbers, vec!["3.14".to_string(), "42".to_string()]);
    }
}
