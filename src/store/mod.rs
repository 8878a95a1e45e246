//! # Store
//!
//! The persistence seam. Handlers talk to `dyn BookStore`; the bundled
//! implementation is an in-memory table with per-operation atomicity.
//! "Not found" is a domain outcome (`Ok(None)` / `Ok(false)`), not an error.

pub mod errors;
pub mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use crate::model::{Book, BookPatch, NewBook};
use crate::query::{QueryPage, QueryPlan};

/// Transactional Book table: CRUD by id, substring-capable listing
pub trait BookStore: Send + Sync {
    /// Persist a new record; the store assigns the id
    fn insert(&self, new: NewBook) -> StoreResult<Book>;

    /// Persist a batch atomically: all records land or none do
    fn insert_many(&self, batch: Vec<NewBook>) -> StoreResult<Vec<Book>>;

    /// Fetch one record by id
    fn get(&self, id: i64) -> StoreResult<Option<Book>>;

    /// Merge a partial update into an existing record; `None` if absent
    fn update(&self, id: i64, patch: BookPatch) -> StoreResult<Option<Book>>;

    /// Delete one record; `false` if it did not exist
    fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Delete a batch in one operation, silently skipping unknown ids;
    /// returns the count actually deleted
    fn delete_many(&self, ids: &[i64]) -> StoreResult<usize>;

    /// Execute a list query plan: filter, sort, page, count
    fn list(&self, plan: &QueryPlan) -> StoreResult<QueryPage>;
}
