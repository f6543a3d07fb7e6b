//! # Query Parameter Parser
//!
//! Parses list query parameters and path ids into validated values.

use std::collections::HashMap;

use crate::schema::{FieldError, Page, ValidationError, ValidationResult};

/// Default cap on `limit`
pub const MAX_LIMIT: u64 = 1000;

/// Path parameter name reported when an id does not parse
pub const ITEM_ID_FIELD: &str = "item_id";

/// Paging bounds applied to list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Number of records returned when `limit` is omitted
    pub default_limit: u64,

    /// Largest accepted `limit`
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: Page::DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Parse `skip` (or `offset`) and `limit` into a page window.
///
/// Both must be non-negative integers and `limit` must not exceed
/// `limits.max_limit`. Unknown parameters are ignored.
pub fn parse_page(params: &HashMap<String, String>, limits: &PageLimits) -> ValidationResult<Page> {
    let mut errors = Vec::new();

    let offset = match params
        .get_key_value("skip")
        .or_else(|| params.get_key_value("offset"))
    {
        Some((key, value)) => match parse_non_negative(key, value) {
            Ok(offset) if offset > i64::MAX as u64 => {
                errors.push(FieldError::new(key.as_str(), "is out of range"));
                0
            }
            Ok(offset) => offset,
            Err(e) => {
                errors.push(e);
                0
            }
        },
        None => 0,
    };

    let limit = match params.get_key_value("limit") {
        Some((key, value)) => match parse_non_negative(key, value) {
            Ok(limit) if limit > limits.max_limit => {
                errors.push(FieldError::new(
                    key.as_str(),
                    format!("must not exceed {}", limits.max_limit),
                ));
                0
            }
            Ok(limit) => limit,
            Err(e) => {
                errors.push(e);
                0
            }
        },
        None => limits.default_limit,
    };

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }

    Ok(Page::new(offset, limit))
}

/// Parse an item id from a path segment
pub fn parse_item_id(raw: &str) -> ValidationResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        ValidationError::single(FieldError::new(ITEM_ID_FIELD, "must be an integer"))
    })
}

fn parse_non_negative(key: &str, value: &str) -> Result<u64, FieldError> {
    let value = value.trim();
    match value.parse::<u64>() {
        Ok(parsed) => Ok(parsed),
        Err(_) if value.parse::<i64>().is_ok() => {
            Err(FieldError::new(key, "must be non-negative"))
        }
        Err(_) => Err(FieldError::new(key, "must be an integer")),
    }
}
