//! Keyset pagination over the user collection.
//!
//! The engine walks a collection whose keys are unique under
//! case-insensitive comparison, in that same order, one bounded page at a
//! time. Resumption uses an opaque cursor carrying the last key delivered,
//! never a row offset, so pages stay free of gaps and duplicates while the
//! collection is mutated between calls.
//!
//! # Components
//!
//! - [`collation`]: the total order and canonical form of keys
//! - [`cursor`]: opaque, URL-safe continuation tokens
//! - [`page_size`]: clamping of caller page-size hints
//! - [`search`]: case-insensitive substring predicate
//! - [`engine`]: the page query itself, parameterized by a [`PageSource`]
//!
//! The engine holds no state between calls. Everything it needs arrives as
//! an argument, including the store capability.

pub mod collation;
pub mod cursor;
mod engine;
mod error;
pub mod page_size;
pub mod search;

pub use cursor::Cursor;
pub use engine::{next_page, KeysetQuery, Page, PageRequest, PageSource};
pub use error::{CursorDecodeError, PaginationError};
pub use page_size::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use search::SearchPredicate;
