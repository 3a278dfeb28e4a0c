use std::path::Path;

use regex::Regex;

/// A compiled exclusion pattern, evaluated against scan-root-relative
/// paths with forward-slash separators.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw: String,
    anchored: bool,
    directory_only: bool,
    regex: Regex,
}

#[derive(Debug)]
pub struct PatternError {
    pub pattern: String,
    pub source: regex::Error,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid ignore pattern '{}': {}", self.pattern, self.source)
    }
}

impl std::error::Error for PatternError {}

impl IgnorePattern {
    /// Compile one gitignore-style pattern. `*` matches any run of
    /// characters, `?` a single character; everything else is literal.
    /// A leading `/` anchors the pattern at the scan root, a trailing `/`
    /// marks it directory-only. Either way the compiled matcher also
    /// covers everything beneath the named path.
    ///
    /// # Errors
    /// Returns `PatternError` when the translated expression is rejected
    /// by the regex engine (e.g. pathological length).
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        let anchored = raw.starts_with('/');
        let directory_only = raw.ends_with('/');
        let body = raw.trim_start_matches('/').trim_end_matches('/');

        let mut translated = String::with_capacity(body.len() * 2);
        for ch in body.chars() {
            match ch {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                    translated.push('\\');
                    translated.push(ch);
                }
                other => translated.push(other),
            }
        }

        // Unanchored patterns may begin at any path-segment boundary.
        let full = if anchored {
            format!("^{translated}(?:/.*)?$")
        } else {
            format!("^(?:.*/)?{translated}(?:/.*)?$")
        };
        let regex = Regex::new(&full).map_err(|source| PatternError {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self {
            raw: raw.to_string(),
            anchored,
            directory_only,
            regex,
        })
    }

    #[must_use]
    pub fn matches(&self, rel_path: &str) -> bool {
        self.regex.is_match(rel_path)
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn anchored(&self) -> bool {
        self.anchored
    }

    #[must_use]
    pub fn directory_only(&self) -> bool {
        self.directory_only
    }
}

#[must_use]
pub fn matches_any(rel_path: &str, patterns: &[IgnorePattern]) -> bool {
    patterns.iter().any(|p| p.matches(rel_path))
}

/// Load patterns from an ignore file: one per line, blank lines and `#`
/// comments skipped. A pattern that fails to compile is reported and
/// dropped; the rest stay in force. A missing file means no patterns.
#[must_use]
pub fn load_ignore_file(path: &Path) -> Vec<IgnorePattern> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    parse_patterns(&text)
}

pub(crate) fn parse_patterns(text: &str) -> Vec<IgnorePattern> {
    let mut patterns = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match IgnorePattern::compile(line) {
            Ok(pattern) => patterns.push(pattern),
            Err(err) => eprintln!("[warn] {err}; pattern skipped"),
        }
    }
    patterns
}
