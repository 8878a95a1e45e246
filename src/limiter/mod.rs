//! # Rate Limiter
//!
//! Fixed-window request counters keyed by route. Reads are more permissive
//! than single-record writes, which are more permissive than bulk
//! operations. Denial happens before any store or cache access; the client
//! retries, the server never does.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// Window length in seconds
const WINDOW_SECS: i64 = 60;

/// Per-class request quotas for one window
#[derive(Debug, Clone)]
pub struct RateQuotas {
    /// List and get-by-id requests per minute
    pub reads_per_minute: usize,
    /// Create/update/delete requests per minute
    pub writes_per_minute: usize,
    /// Bulk requests per minute
    pub bulk_per_minute: usize,
}

impl Default for RateQuotas {
    fn default() -> Self {
        Self {
            reads_per_minute: 100,
            writes_per_minute: 20,
            bulk_per_minute: 10,
        }
    }
}

/// The route keys the limiter tracks, one counter each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKey {
    ListBooks,
    GetBook,
    CreateBook,
    UpdateBook,
    DeleteBook,
    BulkCreateBooks,
    BulkDeleteBooks,
}

impl RouteKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKey::ListBooks => "books.list",
            RouteKey::GetBook => "books.get",
            RouteKey::CreateBook => "books.create",
            RouteKey::UpdateBook => "books.update",
            RouteKey::DeleteBook => "books.delete",
            RouteKey::BulkCreateBooks => "books.bulk_create",
            RouteKey::BulkDeleteBooks => "books.bulk_delete",
        }
    }

    fn quota(&self, quotas: &RateQuotas) -> usize {
        match self {
            RouteKey::ListBooks | RouteKey::GetBook => quotas.reads_per_minute,
            RouteKey::CreateBook | RouteKey::UpdateBook | RouteKey::DeleteBook => {
                quotas.writes_per_minute
            }
            RouteKey::BulkCreateBooks | RouteKey::BulkDeleteBooks => quotas.bulk_per_minute,
        }
    }
}

/// Fixed-window per-route limiter
pub struct RateLimiter {
    /// route key -> (count, window start)
    windows: RwLock<HashMap<&'static str, (usize, DateTime<Utc>)>>,
    quotas: RateQuotas,
}

impl RateLimiter {
    pub fn new(quotas: RateQuotas) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            quotas,
        }
    }

    /// Whether one more request on this route fits the current window
    ///
    /// A poisoned lock fails open: limiting is protection, not correctness.
    pub fn allow(&self, route: RouteKey) -> bool {
        let quota = route.quota(&self.quotas);
        let now = Utc::now();

        let mut windows = match self.windows.write() {
            Ok(windows) => windows,
            Err(_) => return true,
        };

        let entry = windows.entry(route.as_str()).or_insert((0, now));

        // Reset the counter when a new window starts
        if (now - entry.1).num_seconds() >= WINDOW_SECS {
            entry.0 = 0;
            entry.1 = now;
        }

        if entry.0 >= quota {
            return false;
        }

        entry.0 += 1;
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateQuotas::default())
    }
}
