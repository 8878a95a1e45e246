//! Response envelopes
//!
//! Every success response is wrapped in a `{"status": "success", ...}`
//! envelope; list responses additionally carry their pagination fields.

use serde::Serialize;

use crate::model::Book;
use crate::query::ListParams;

const STATUS_SUCCESS: &str = "success";

/// Envelope for GET /books
#[derive(Debug, Clone, Serialize)]
pub struct ListEnvelope {
    pub status: &'static str,
    pub data: Vec<Book>,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    /// Echo of the `q` parameter; null when no search was requested
    pub search_query: Option<String>,
}

impl ListEnvelope {
    pub fn new(items: Vec<Book>, total_items: u64, total_pages: u64, params: &ListParams) -> Self {
        Self {
            status: STATUS_SUCCESS,
            data: items,
            page: params.page,
            per_page: params.per_page,
            total_pages,
            total_items,
            search_query: params.search.clone(),
        }
    }
}

/// Envelope for GET /books/{id}
#[derive(Debug, Clone, Serialize)]
pub struct SingleEnvelope {
    pub status: &'static str,
    pub data: Book,
}

impl SingleEnvelope {
    pub fn new(data: Book) -> Self {
        Self {
            status: STATUS_SUCCESS,
            data,
        }
    }
}

/// Envelope for create and update responses
#[derive(Debug, Clone, Serialize)]
pub struct RecordEnvelope {
    pub status: &'static str,
    pub message: String,
    pub data: Book,
}

impl RecordEnvelope {
    pub fn new(message: impl Into<String>, data: Book) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data,
        }
    }
}

/// Envelope for bulk create responses
#[derive(Debug, Clone, Serialize)]
pub struct BatchEnvelope {
    pub status: &'static str,
    pub message: String,
    pub data: Vec<Book>,
}

impl BatchEnvelope {
    pub fn new(message: impl Into<String>, data: Vec<Book>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data,
        }
    }
}

/// Envelope for responses that carry no record data
#[derive(Debug, Clone, Serialize)]
pub struct MessageEnvelope {
    pub status: &'static str,
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
        }
    }
}
