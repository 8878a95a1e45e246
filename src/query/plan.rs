//! Query plan
//!
//! A `QueryPlan` is the bounded, deterministic execution recipe the store
//! runs for a list request: a substring filter, an enumerated-column sort
//! and an offset/limit window. The store owns the data; the plan owns the
//! semantics, so every backend orders and pages identically.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::Book;

use super::params::{ListParams, SortField, SortOrder};

/// Execution recipe for one list request
#[derive(Debug, Clone)]
pub struct QueryPlan {
    params: ListParams,
    /// Lowercased search needle, precomputed once per request
    needle: Option<String>,
}

impl QueryPlan {
    pub fn new(params: ListParams) -> Self {
        let needle = params.search.as_ref().map(|q| q.to_lowercase());
        Self { params, needle }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Records skipped before the requested page
    ///
    /// Saturates instead of overflowing: an absurdly large page number is
    /// still a valid request and must come back as an empty page, not a
    /// panic or a wrapped-around offset.
    pub fn offset(&self) -> usize {
        let skipped = self
            .params
            .page
            .saturating_sub(1)
            .saturating_mul(self.params.per_page);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Page size
    pub fn limit(&self) -> usize {
        self.params.per_page as usize
    }

    /// Case-insensitive substring match over title OR author OR summary
    pub fn matches(&self, book: &Book) -> bool {
        let needle = match &self.needle {
            Some(needle) => needle,
            None => return true,
        };

        book.title.to_lowercase().contains(needle)
            || book.author.to_lowercase().contains(needle)
            || book
                .summary
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }

    /// Whether a sort is requested; without one, insertion (id) order stands
    pub fn is_sorted(&self) -> bool {
        self.params.sort.is_some()
    }

    /// Compare two records per the requested column and direction
    ///
    /// Intended for a stable sort over records already in id order, so
    /// equal keys keep their id ordering. A missing `published_date`
    /// orders before any date ascending.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let field = match self.params.sort {
            Some(field) => field,
            None => return Ordering::Equal,
        };

        let ordering = match field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Author => a.author.cmp(&b.author),
            SortField::PublishedDate => a.published_date.cmp(&b.published_date),
        };

        match self.params.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Total page count for a filtered result set
    pub fn page_count(&self, total_items: usize) -> u64 {
        page_count(total_items as u64, self.params.per_page)
    }
}

/// `ceil(total_items / per_page)`; zero pages for an empty result set
pub fn page_count(total_items: u64, per_page: u64) -> u64 {
    total_items.div_ceil(per_page)
}

/// One page of a filtered, sorted result set plus set-wide totals
#[derive(Debug, Clone, Serialize)]
pub struct QueryPage {
    pub items: Vec<Book>,
    pub total_items: u64,
    pub total_pages: u64,
}
