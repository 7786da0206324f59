//! Tokenization and overlap resolution.

use std::collections::HashMap;

use crate::pattern::PatternSet;
use crate::render::{escape_html, render};
use crate::{LanguageClass, Span, SyntaxError, language_tag};

/// Escaped text together with its accepted spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// The HTML-escaped input; span offsets index into this string.
    pub escaped: String,
    /// Non-overlapping spans sorted by `start`.
    pub spans: Vec<Span>,
}

impl Classified {
    /// Renders the escaped text with span markers.
    pub fn render(&self) -> String {
        render(&self.escaped, &self.spans)
    }
}

/// Holds one compiled [`PatternSet`] per language class.
///
/// Compiling the sets is the only fallible step, so it happens once in
/// [`Highlighter::new`]; highlighting itself never fails.
pub struct Highlighter {
    sets: HashMap<LanguageClass, PatternSet>,
}

impl Highlighter {
    /// Compiles the pattern sets of every language class.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut sets = HashMap::with_capacity(LanguageClass::ALL.len());
        for class in LanguageClass::ALL {
            sets.insert(class, PatternSet::compile(class)?);
        }
        tracing::debug!("Compiled {} pattern sets", sets.len());
        Ok(Self { sets })
    }

    /// Returns the pattern set for a language tag, if any.
    pub fn pattern_set(&self, tag: &str) -> Option<&PatternSet> {
        LanguageClass::from_tag(tag).and_then(|class| self.sets.get(&class))
    }

    /// Escapes `text` and classifies it for the given language tag.
    ///
    /// Unknown tags produce no spans.
    pub fn classify(&self, text: &str, tag: &str) -> Classified {
        let escaped = escape_html(text);
        let spans = match self.pattern_set(tag) {
            Some(set) => resolve_overlaps(set.candidates(&escaped)),
            None => Vec::new(),
        };
        Classified { escaped, spans }
    }

    /// Highlights `text`, picking the language from `filename`.
    pub fn highlight(&self, text: &str, filename: &str) -> String {
        self.classify(text, &language_tag(filename)).render()
    }
}

/// Reduces candidate spans to a sorted, non-overlapping set.
///
/// Candidates are ordered by start offset, then category priority, then the
/// index of the matcher that produced them. A sweep keeps a span only if it
/// starts at or after the end of the last kept span.
pub fn resolve_overlaps(mut candidates: Vec<(Span, usize)>) -> Vec<Span> {
    candidates.sort_by_key(|(span, rule)| (span.start, span.category, *rule));

    let mut accepted = Vec::with_capacity(candidates.len());
    let mut last_end = 0;
    for (span, _) in candidates {
        if span.start >= last_end {
            last_end = span.end;
            accepted.push(span);
        }
    }
    accepted
}
