//! Language detection from file names.

/// A family of languages sharing one pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageClass {
    /// JavaScript-family and C-family sources, which share one combined set.
    JsLike,
    /// Python and Ruby.
    PyLike,
    /// HTML and XML.
    Markup,
    /// CSS and SCSS.
    Style,
    /// Markdown.
    Markdown,
}

impl LanguageClass {
    /// All classes, in the order their pattern sets are compiled.
    pub const ALL: [LanguageClass; 5] = [
        LanguageClass::JsLike,
        LanguageClass::PyLike,
        LanguageClass::Markup,
        LanguageClass::Style,
        LanguageClass::Markdown,
    ];

    /// Maps a language tag (a lower-case file extension) to its class.
    ///
    /// Returns `None` for unknown tags and for `"none"`, in which case the
    /// text is passed through without highlighting.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "js" | "ts" | "jsx" | "tsx" | "json" | "vue" | "svelte" => Some(Self::JsLike),
            "c" | "cpp" | "h" | "java" | "go" | "rs" => Some(Self::JsLike),
            "py" | "rb" => Some(Self::PyLike),
            "html" | "xml" => Some(Self::Markup),
            "css" | "scss" => Some(Self::Style),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Detects the class for a file name.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::from_tag(&language_tag(filename))
    }
}

/// Derives the language tag from a file name.
///
/// The tag is the lower-cased text after the last `.`; names without a dot
/// get the tag `"none"`.
pub fn language_tag(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag("main.rs"), "rs");
        assert_eq!(language_tag("Component.TSX"), "tsx");
        assert_eq!(language_tag("archive.tar.gz"), "gz");
        assert_eq!(language_tag("Makefile"), "none");
    }

    #[test]
    fn test_class_lookup() {
        assert_eq!(LanguageClass::from_filename("app.js"), Some(LanguageClass::JsLike));
        assert_eq!(LanguageClass::from_filename("lib.rs"), Some(LanguageClass::JsLike));
        assert_eq!(LanguageClass::from_filename("script.rb"), Some(LanguageClass::PyLike));
        assert_eq!(LanguageClass::from_filename("index.HTML"), Some(LanguageClass::Markup));
        assert_eq!(LanguageClass::from_filename("site.scss"), Some(LanguageClass::Style));
        assert_eq!(LanguageClass::from_filename("README.md"), Some(LanguageClass::Markdown));
        assert_eq!(LanguageClass::from_filename("notes.txt"), None);
        assert_eq!(LanguageClass::from_filename("LICENSE"), None);
    }
}
