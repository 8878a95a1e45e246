//! Payload validator
//!
//! Applies the Book schema rules to arbitrary JSON payloads before anything
//! reaches the store:
//! - `title`, `author`: required strings, 1-100 characters
//! - `published_date`: optional string matching `YYYY-MM-DD`
//! - `summary`: optional string, unbounded
//!
//! Unknown fields are ignored. Validation is deterministic, collects every
//! violation, and never panics on malformed input.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::model::{BookPatch, NewBook, MAX_NAME_LEN};

use super::errors::{BulkItemErrors, FieldError, FieldErrors};

/// Pattern for `published_date`; digits and dashes only, not a calendar check
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// Validate a creation payload into a normalized `NewBook`
pub fn validate_new(payload: &Value) -> Result<NewBook, FieldErrors> {
    let obj = match payload.as_object() {
        Some(obj) => obj,
        None => {
            return Err(vec![FieldError::new("payload", "must be a JSON object")]);
        }
    };

    let mut errors = FieldErrors::new();

    let title = required_name(obj.get("title"), "title", &mut errors);
    let author = required_name(obj.get("author"), "author", &mut errors);
    let published_date = optional_date(obj.get("published_date"), &mut errors);
    let summary = optional_text(obj.get("summary"), "summary", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewBook {
        title: title.unwrap_or_default(),
        author: author.unwrap_or_default(),
        published_date,
        summary,
    })
}

/// Validate a partial-update payload into a `BookPatch`
///
/// Same per-field rules as creation, but absent fields are simply not part
/// of the patch. An explicitly supplied empty or overlong value still fails.
pub fn validate_patch(payload: &Value) -> Result<BookPatch, FieldErrors> {
    let obj = match payload.as_object() {
        Some(obj) => obj,
        None => {
            return Err(vec![FieldError::new("payload", "must be a JSON object")]);
        }
    };

    let mut errors = FieldErrors::new();
    let mut patch = BookPatch::default();

    if let Some(value) = obj.get("title") {
        patch.title = required_name(Some(value), "title", &mut errors);
    }
    if let Some(value) = obj.get("author") {
        patch.author = required_name(Some(value), "author", &mut errors);
    }
    if obj.contains_key("published_date") {
        patch.published_date = optional_date(obj.get("published_date"), &mut errors);
    }
    if obj.contains_key("summary") {
        patch.summary = optional_text(obj.get("summary"), "summary", &mut errors);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Validate every item of a bulk-create payload, all-or-nothing
///
/// Items are validated independently; a single invalid item rejects the
/// whole batch, reporting each failing item's index and field errors.
pub fn validate_bulk(items: &[Value]) -> Result<Vec<NewBook>, Vec<BulkItemErrors>> {
    let mut books = Vec::with_capacity(items.len());
    let mut failures = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_new(item) {
            Ok(book) => books.push(book),
            Err(errors) => failures.push(BulkItemErrors { index, errors }),
        }
    }

    if failures.is_empty() {
        Ok(books)
    } else {
        Err(failures)
    }
}

/// Required 1-100 character string field
fn required_name(
    value: Option<&Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(Value::String(s)) => {
            let len = s.chars().count();
            if len == 0 {
                errors.push(FieldError::new(field, "must not be empty"));
                None
            } else if len > MAX_NAME_LEN {
                errors.push(FieldError::new(
                    field,
                    format!("must be at most {} characters", MAX_NAME_LEN),
                ));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

/// Optional `YYYY-MM-DD` string field; absent is fine, explicit null is not
fn optional_date(value: Option<&Value>, errors: &mut FieldErrors) -> Option<String> {
    match value {
        None => None,
        Some(Value::Null) => {
            errors.push(FieldError::new("published_date", "must not be null"));
            None
        }
        Some(Value::String(s)) => {
            if date_pattern().is_match(s) {
                Some(s.clone())
            } else {
                errors.push(FieldError::new(
                    "published_date",
                    "must match YYYY-MM-DD",
                ));
                None
            }
        }
        Some(_) => {
            errors.push(FieldError::new("published_date", "must be a string"));
            None
        }
    }
}

/// Optional free-text string field; absent is fine, explicit null is not
fn optional_text(
    value: Option<&Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        None => None,
        Some(Value::Null) => {
            errors.push(FieldError::new(field, "must not be null"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}
