//! List query parameter parsing
//!
//! Parses the GET /books parameters (`page`, `per_page`, `sort`, `order`,
//! `q`) into a structured form. Enum membership and numeric ranges are
//! checked here so nothing downstream ever sees an arbitrary field name.

use std::collections::HashMap;

use super::errors::{ParamError, ParamResult};

/// Default page number
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Maximum page size accepted
pub const MAX_PER_PAGE: u64 = 1000;

/// Sortable Book columns; the only field names the store will ever order by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Author,
    PublishedDate,
}

impl SortField {
    pub fn parse(value: &str) -> ParamResult<Self> {
        match value {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "published_date" => Ok(SortField::PublishedDate),
            other => Err(ParamError::InvalidSortField(other.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> ParamResult<Self> {
        match value {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ParamError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Parsed and range-checked list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number
    pub page: u64,

    /// Items per page, 1..=MAX_PER_PAGE
    pub per_page: u64,

    /// Sort column; None means insertion (id) order
    pub sort: Option<SortField>,

    /// Sort direction, ascending by default
    pub order: SortOrder,

    /// Substring search over title/author/summary; None or empty = no filter
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            order: SortOrder::Asc,
            search: None,
        }
    }
}

impl ListParams {
    /// Parse query parameters from a key/value map
    pub fn parse(params: &HashMap<String, String>) -> ParamResult<Self> {
        let mut result = ListParams::default();

        for (key, value) in params {
            match key.as_str() {
                "page" => result.page = parse_positive("page", value)?,
                "per_page" => result.per_page = parse_positive("per_page", value)?,
                "sort" => result.sort = Some(SortField::parse(value)?),
                "order" => result.order = SortOrder::parse(value)?,
                "q" => {
                    if !value.is_empty() {
                        result.search = Some(value.clone());
                    }
                }
                // Unknown parameters are ignored
                _ => {}
            }
        }

        if result.per_page > MAX_PER_PAGE {
            return Err(ParamError::PerPageExceeded(result.per_page, MAX_PER_PAGE));
        }

        Ok(result)
    }
}

/// Parse a strictly positive integer parameter
fn parse_positive(name: &str, value: &str) -> ParamResult<u64> {
    match value.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ParamError::InvalidParam(format!(
            "{} must be a positive integer, got {:?}",
            name, value
        ))),
    }
}
