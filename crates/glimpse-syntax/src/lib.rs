//! # Glimpse Syntax
//!
//! Lightweight, pattern-based syntax highlighting.
//!
//! ## Pipeline
//!
//! ```text
//! raw text ──escape──▶ escaped text ──matchers──▶ candidate spans
//!                                                      │
//!                          markup ◀──render── accepted spans ◀──sweep──┘
//! ```
//!
//! Every matcher of the selected [`LanguageClass`] runs independently over the
//! escaped text. The resulting candidates may overlap (a keyword inside a
//! string, a number inside a comment), so a left-to-right sweep keeps the
//! earliest-starting span and drops anything that begins before it ends.
//! Ties on the start offset go to the higher-priority [`Category`]:
//! comment, then string, then keyword, then number.
//!
//! This is deliberately not a parser. There is no nesting, no incremental
//! re-highlighting and no semantic analysis.

mod highlighter;
mod language;
mod pattern;
mod render;

pub use highlighter::{Classified, Highlighter};
pub use language::{LanguageClass, language_tag};
pub use pattern::{Matcher, PatternSet};
pub use render::{escape_html, render};

/// Errors that can occur while building highlighters.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Invalid {class:?} pattern: {source}")]
    Pattern {
        class: LanguageClass,
        #[source]
        source: regex::Error,
    },
}

/// Classification of a highlighted span.
///
/// The declaration order is the tie-break priority used by overlap
/// resolution: variants declared first win when two spans start at the same
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Comment,
    String,
    Keyword,
    Number,
}

impl Category {
    /// Returns the CSS class name used when rendering this category.
    pub fn class_name(&self) -> &'static str {
        match self {
            Category::Comment => "comment",
            Category::String => "string",
            Category::Keyword => "keyword",
            Category::Number => "number",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A classified slice of escaped text.
///
/// `start` and `end` are byte offsets into the escaped text the span was
/// produced from, `start < end` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub category: Category,
}

impl Span {
    /// Returns the length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans are never empty; provided for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_priority_order() {
        assert!(Category::Comment < Category::String);
        assert!(Category::String < Category::Keyword);
        assert!(Category::Keyword < Category::Number);
    }

    #[test]
    fn test_category_class_names() {
        assert_eq!(Category::Comment.to_string(), "comment");
        assert_eq!(Category::Number.class_name(), "number");
    }
}
