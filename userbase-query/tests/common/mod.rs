//! Shared fakes for engine tests.

#![allow(dead_code)]

use std::cell::Cell;
use userbase_query::collation;
use userbase_query::{next_page, KeysetQuery, Page, PageRequest, PageSource};
use userbase_types::{User, UserId};

/// In-test page source over a fixed list of users.
pub struct VecSource {
    users: Vec<User>,
    pub calls: Cell<usize>,
    pub last_limit: Cell<Option<usize>>,
}

impl VecSource {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut users: Vec<User> = emails
            .into_iter()
            .map(|e| User::new(UserId::new(), e))
            .collect();
        users.sort_by(|a, b| collation::compare(&a.email, &b.email));
        Self {
            users,
            calls: Cell::new(0),
            last_limit: Cell::new(None),
        }
    }

    pub fn remove(&mut self, email: &str) {
        self.users.retain(|u| !collation::same_key(&u.email, email));
    }

    pub fn insert(&mut self, email: &str) {
        self.users.push(User::new(UserId::new(), email));
        self.users.sort_by(|a, b| collation::compare(&a.email, &b.email));
    }
}

impl PageSource for VecSource {
    type Error = std::convert::Infallible;

    fn fetch_page(&self, query: &KeysetQuery<'_>) -> Result<Vec<User>, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        self.last_limit.set(Some(query.limit));
        Ok(self
            .users
            .iter()
            .filter(|u| query.predicate.matches(&u.email))
            .filter(|u| {
                query
                    .after
                    .is_none_or(|b| collation::compare(&u.email, b).is_gt())
            })
            .take(query.limit)
            .cloned()
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("connection refused by db-01.internal:5432")]
pub struct Unreachable;

/// Page source whose every read fails.
pub struct FailingSource;

impl PageSource for FailingSource {
    type Error = Unreachable;

    fn fetch_page(&self, _query: &KeysetQuery<'_>) -> Result<Vec<User>, Self::Error> {
        Err(Unreachable)
    }
}

/// Follows cursors from `first` until a terminal page, returning every page.
pub fn walk<S: PageSource>(source: &S, first: PageRequest) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut request = Some(first);
    while let Some(req) = request {
        let page = next_page(source, &req).unwrap();
        request = req.after_page(&page);
        pages.push(page);
        assert!(pages.len() < 10_000, "walk did not terminate");
    }
    pages
}

pub fn emails(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| p.records.iter().map(|u| u.email.clone()))
        .collect()
}
