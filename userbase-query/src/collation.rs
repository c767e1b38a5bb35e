//! Case-insensitive key collation.
//!
//! Keys are compared after ASCII case folding, byte by byte. This is the
//! same rule SQLite applies for `COLLATE NOCASE`, so the storage uniqueness
//! constraint, the page ordering and the range bound all agree. Non-ASCII
//! bytes compare as-is.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Returns the canonical form of `key` used for uniqueness and matching.
#[must_use]
pub fn normalize(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// Total order over keys. `Equal` means the two keys name the same record.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|b| b.to_ascii_lowercase());
    let b = b.bytes().map(|b| b.to_ascii_lowercase());
    a.cmp(b)
}

/// Returns true if `a` and `b` collide under the collation.
#[must_use]
pub fn same_key(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// A key that orders, compares and hashes under the collation while
/// keeping its original spelling.
#[derive(Clone)]
pub struct FoldedKey(String);

impl FoldedKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as originally spelled.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl PartialEq for FoldedKey {
    fn eq(&self, other: &Self) -> bool {
        same_key(&self.0, &other.0)
    }
}

impl Eq for FoldedKey {}

impl PartialOrd for FoldedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FoldedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl Hash for FoldedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Debug for FoldedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FoldedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
