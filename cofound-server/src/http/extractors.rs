//! Custom Axum extractors

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::models::ValidationError;

use super::error::ApiError;

#[derive(Deserialize)]
struct UserIdParam {
    user_id: i64,
}

/// The acting user for a request.
///
/// The wire protocol carries identity as a caller-supplied `user_id`
/// query parameter with no session verification. This extractor is the
/// single place that parameter is read, so swapping in real
/// authentication later only means changing this impl, not the handlers.
pub struct CurrentUser(pub i64);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(param): Query<UserIdParam> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "user_id",
                    reason: "missing or malformed user_id query parameter",
                })
            })?;

        Ok(Self(param.user_id))
    }
}
