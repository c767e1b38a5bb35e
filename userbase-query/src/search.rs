//! Case-insensitive substring search over keys.
//!
//! The needle is stored in collation-normalized form. Stores that run the
//! filter in SQL use [`SearchPredicate::like_pattern`]; stores that scan in
//! memory use [`SearchPredicate::matches`]. Both give the same answers for
//! every key.

use crate::collation;
use userbase_types::MAX_EMAIL_LEN;

/// Escape character used in [`SearchPredicate::like_pattern`].
pub const LIKE_ESCAPE: char = '\\';

/// Substring filter on the key field. The empty predicate matches all keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPredicate {
    needle: String,
}

impl SearchPredicate {
    /// Builds a predicate from an optional raw search string.
    #[must_use]
    pub fn new(search: Option<&str>) -> Self {
        Self {
            needle: search.map(collation::normalize).unwrap_or_default(),
        }
    }

    /// The predicate that matches every key.
    #[must_use]
    pub fn match_all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalized search text.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns true if the needle is longer than any storable key, so no
    /// record can match.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        self.needle.len() > MAX_EMAIL_LEN
    }

    /// Returns true if `key` contains the needle, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.is_match_all() || collation::normalize(key).contains(&self.needle)
    }

    /// Renders the predicate as a `LIKE` pattern to be used with
    /// `ESCAPE '\'`. Wildcards in the needle are escaped so they match
    /// literally.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() + 2);
        pattern.push('%');
        for c in self.needle.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Returns true iff `search` (normalized) occurs in `candidate` (normalized).
/// An absent or empty search matches everything.
#[must_use]
pub fn matches(candidate: &str, search: Option<&str>) -> bool {
    SearchPredicate::new(search).matches(candidate)
}
