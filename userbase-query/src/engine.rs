//! Paginated query engine.
//!
//! Each call fetches at most `page_size + 1` rows strictly after the
//! cursor's key, in collation order. The extra look-ahead row only signals
//! that another page exists and is never returned. When it is present the
//! continuation cursor is the key of the last row kept.

use crate::cursor::{self, Cursor};
use crate::error::PaginationError;
use crate::page_size;
use crate::search::SearchPredicate;
use tracing::{debug, warn};
use userbase_types::User;

/// A single bounded range read against the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeysetQuery<'a> {
    /// Substring filter on the key.
    pub predicate: &'a SearchPredicate,
    /// Exclusive lower bound under the collation, or `None` to start at
    /// the first key.
    pub after: Option<&'a str>,
    /// Maximum number of rows to return.
    pub limit: usize,
}

/// Store capability the engine is parameterized by.
///
/// Implementations must return records whose key matches `predicate` and
/// compares strictly greater than `after`, ascending under
/// [`collation::compare`](crate::collation::compare), at most `limit` of
/// them.
pub trait PageSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_page(&self, query: &KeysetQuery<'_>) -> Result<Vec<User>, Self::Error>;
}

/// Resolved inputs of a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    search: SearchPredicate,
    after: Option<String>,
    page_size: i64,
}

impl PageRequest {
    #[must_use]
    pub fn new(search: SearchPredicate, after: Option<String>, page_size: i64) -> Self {
        Self {
            search,
            after,
            page_size,
        }
    }

    /// Builds a request from raw client parameters.
    ///
    /// An empty cursor counts as absent. A cursor that does not decode is
    /// dropped and the walk restarts from the first key. The page-size hint
    /// goes through [`page_size::resolve`].
    #[must_use]
    pub fn from_params(cursor: Option<&str>, page_size: Option<&str>, search: Option<&str>) -> Self {
        let after = cursor
            .filter(|token| !token.is_empty())
            .and_then(|token| match cursor::decode(token) {
                Ok(key) => Some(key),
                Err(e) => {
                    warn!("Discarding unusable cursor: {}", e);
                    None
                }
            });

        Self {
            search: SearchPredicate::new(search),
            after,
            page_size: page_size::resolve(page_size),
        }
    }

    /// Returns a request for the page following `page`, or `None` if `page`
    /// was the last one.
    #[must_use]
    pub fn after_page(&self, page: &Page) -> Option<Self> {
        let key = page.cursor.as_ref()?.key().ok()?;
        Some(Self {
            search: self.search.clone(),
            after: Some(key),
            page_size: self.page_size,
        })
    }

    #[must_use]
    pub fn search(&self) -> &SearchPredicate {
        &self.search
    }

    #[must_use]
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Records in ascending key order.
    pub records: Vec<User>,
    /// True if at least one more matching record follows this page.
    pub has_more: bool,
    /// Continuation cursor. Present iff `has_more`.
    pub cursor: Option<Cursor>,
    /// The page size that was applied.
    pub page_size: i64,
}

impl Page {
    fn terminal(records: Vec<User>, page_size: i64) -> Self {
        Self {
            records,
            has_more: false,
            cursor: None,
            page_size,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetches the page described by `request` from `source`.
///
/// A non-positive page size, or search text longer than any storable key,
/// yields an empty, terminal page without touching the store.
///
/// # Errors
///
/// Returns [`PaginationError::QueryFailed`] if the store read fails.
pub fn next_page<S>(source: &S, request: &PageRequest) -> Result<Page, PaginationError>
where
    S: PageSource + ?Sized,
{
    let Ok(page_size) = usize::try_from(request.page_size) else {
        return Ok(Page::terminal(Vec::new(), request.page_size));
    };
    if page_size == 0 {
        return Ok(Page::terminal(Vec::new(), request.page_size));
    }
    if request.search.is_unsatisfiable() {
        debug!("Search text longer than any key; returning empty page");
        return Ok(Page::terminal(Vec::new(), request.page_size));
    }

    let query = KeysetQuery {
        predicate: &request.search,
        after: request.after.as_deref(),
        limit: page_size.saturating_add(1),
    };

    let mut records = source
        .fetch_page(&query)
        .map_err(|e| PaginationError::QueryFailed(Box::new(e)))?;

    let has_more = records.len() > page_size;
    records.truncate(page_size);

    let cursor = if has_more {
        records.last().map(|last| cursor::encode(&last.email))
    } else {
        None
    };

    debug!(
        "Page fetched: {} records, has_more={}, resumed={}",
        records.len(),
        has_more,
        query.after.is_some()
    );

    Ok(Page {
        records,
        has_more,
        cursor,
        page_size: request.page_size,
    })
}
