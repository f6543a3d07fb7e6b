//! Item schema and validation
//!
//! Defines the canonical item shape and turns raw JSON payloads into
//! validated inputs before anything reaches the store.

mod errors;
mod types;
mod validator;

pub use errors::{FieldError, ValidationError, ValidationResult};
pub use types::{
    Item, ItemInput, Page, ALIAS_DONE, ALIAS_TITLE, FIELD_DESCRIPTION, FIELD_DONE, FIELD_ID,
    FIELD_TITLE,
};
pub use validator::{validate_item, BODY_FIELD};
