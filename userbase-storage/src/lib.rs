//! Storage layer for Userbase.
//!
//! Provides the backing stores the pagination engine reads from.
//!
//! # Architecture
//!
//! - [`SqliteUserStore`] keeps users in a SQLite table whose `email` column
//!   is `UNIQUE COLLATE NOCASE`, so the database enforces the same
//!   case-insensitive collation the engine pages by
//! - [`MemoryUserStore`] keeps users in an ordered map keyed by that
//!   collation, for tests and embedders that need no persistence
//! - Schema migrations are applied on open and tracked in `user_version`
//!
//! Both stores implement [`UserStore`], which the HTTP layer receives as an
//! explicit dependency.

mod error;
mod memory;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;

use userbase_query::PageSource;
use userbase_types::{User, UserId};

/// Record operations the service needs from a backing store.
pub trait UserStore: PageSource<Error = StorageError> + Send + Sync {
    /// Inserts a new user with a freshly generated id.
    ///
    /// Fails with [`StorageError::DuplicateEmail`] if an email equal under
    /// case-insensitive comparison already exists.
    fn insert(&self, email: &str) -> StorageResult<User>;

    /// Looks up a user by id.
    fn get(&self, id: &UserId) -> StorageResult<Option<User>>;

    /// Removes a user. Returns whether a record was removed.
    fn delete(&self, id: &UserId) -> StorageResult<bool>;
}
