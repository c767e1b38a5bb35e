//! In-memory user store.

use crate::error::{StorageError, StorageResult};
use crate::UserStore;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;
use userbase_query::collation::FoldedKey;
use userbase_query::{KeysetQuery, PageSource};
use userbase_types::{User, UserId};

#[derive(Default)]
struct Inner {
    by_email: BTreeMap<FoldedKey, User>,
    by_id: HashMap<UserId, FoldedKey>,
}

/// User store held entirely in memory. Ordering and uniqueness come from
/// the case-insensitive collation of [`FoldedKey`].
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StorageResult<usize> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.by_email.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl PageSource for MemoryUserStore {
    type Error = StorageError;

    fn fetch_page(&self, query: &KeysetQuery<'_>) -> StorageResult<Vec<User>> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        let lower = match query.after {
            Some(key) => Bound::Excluded(FoldedKey::new(key)),
            None => Bound::Unbounded,
        };
        Ok(inner
            .by_email
            .range((lower, Bound::Unbounded))
            .map(|(_, user)| user)
            .filter(|user| query.predicate.matches(&user.email))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

impl UserStore for MemoryUserStore {
    fn insert(&self, email: &str) -> StorageResult<User> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let key = FoldedKey::new(email);
        if inner.by_email.contains_key(&key) {
            return Err(StorageError::DuplicateEmail(email.to_string()));
        }
        let user = User::new(UserId::new(), email);
        inner.by_id.insert(user.id, key.clone());
        inner.by_email.insert(key, user.clone());
        Ok(user)
    }

    fn get(&self, id: &UserId) -> StorageResult<Option<User>> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner
            .by_id
            .get(id)
            .and_then(|key| inner.by_email.get(key))
            .cloned())
    }

    fn delete(&self, id: &UserId) -> StorageResult<bool> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let Some(key) = inner.by_id.remove(id) else {
            return Ok(false);
        };
        inner.by_email.remove(&key);
        Ok(true)
    }
}
