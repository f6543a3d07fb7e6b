//! Request extractors
//!
//! Each extractor validates its part of the request and rejects with an
//! [`ApiError`], so handlers only ever see well-formed input.

use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use crate::schema::{validate_item, ItemInput, Page};

use super::errors::ApiError;
use super::parser::{parse_item_id, parse_page};
use super::state::SharedState;

/// Validated item payload from the request body
#[derive(Debug)]
pub struct ValidatedItem(pub ItemInput);

#[async_trait]
impl<S> FromRequest<S> for ValidatedItem
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;
        Ok(Self(validate_item(&payload)?))
    }
}

/// Item id from the `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct ItemId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(parse_item_id(&raw)?))
    }
}

/// Page window from the list query string
#[derive(Debug, Clone, Copy)]
pub struct ListParams(pub Page);

#[async_trait]
impl FromRequestParts<SharedState> for ListParams {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(parse_page(&raw, &state.limits)?))
    }
}
