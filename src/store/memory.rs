//! In-memory book store
//!
//! A `BTreeMap` keyed by id behind one `RwLock`. Every trait operation
//! takes the lock exactly once, which gives per-operation atomicity: a
//! batch insert or delete is fully applied or not applied at all.
//! Iteration order is id order, so unsorted list results come back in
//! insertion order.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::model::{Book, BookPatch, NewBook};
use crate::query::{QueryPage, QueryPlan};

use super::errors::{StoreError, StoreResult};
use super::BookStore;

#[derive(Debug, Default)]
struct Shelf {
    books: BTreeMap<i64, Book>,
    next_id: i64,
}

impl Shelf {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe in-memory implementation of [`BookStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    shelf: RwLock<Shelf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Shelf>> {
        self.shelf
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Shelf>> {
        self.shelf
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

impl BookStore for MemoryStore {
    fn insert(&self, new: NewBook) -> StoreResult<Book> {
        let mut shelf = self.write()?;
        let id = shelf.assign_id();
        let book = new.into_book(id);
        shelf.books.insert(id, book.clone());
        Ok(book)
    }

    fn insert_many(&self, batch: Vec<NewBook>) -> StoreResult<Vec<Book>> {
        // Single lock acquisition: the whole batch lands or none of it does
        let mut shelf = self.write()?;
        let mut created = Vec::with_capacity(batch.len());
        for new in batch {
            let id = shelf.assign_id();
            let book = new.into_book(id);
            shelf.books.insert(id, book.clone());
            created.push(book);
        }
        Ok(created)
    }

    fn get(&self, id: i64) -> StoreResult<Option<Book>> {
        Ok(self.read()?.books.get(&id).cloned())
    }

    fn update(&self, id: i64, patch: BookPatch) -> StoreResult<Option<Book>> {
        let mut shelf = self.write()?;
        match shelf.books.get_mut(&id) {
            Some(book) => {
                patch.apply_to(book);
                Ok(Some(book.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.write()?.books.remove(&id).is_some())
    }

    fn delete_many(&self, ids: &[i64]) -> StoreResult<usize> {
        let mut shelf = self.write()?;
        let mut deleted = 0;
        for id in ids {
            if shelf.books.remove(id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    fn list(&self, plan: &QueryPlan) -> StoreResult<QueryPage> {
        let shelf = self.read()?;

        // Filter in id order; the later stable sort keeps id order for ties
        let mut matched: Vec<Book> = shelf
            .books
            .values()
            .filter(|b| plan.matches(b))
            .cloned()
            .collect();
        drop(shelf);

        if plan.is_sorted() {
            matched.sort_by(|a, b| plan.compare(a, b));
        }

        let total_items = matched.len() as u64;
        let total_pages = plan.page_count(matched.len());

        let items: Vec<Book> = matched
            .into_iter()
            .skip(plan.offset())
            .take(plan.limit())
            .collect();

        Ok(QueryPage {
            items,
            total_items,
            total_pages,
        })
    }
}
