/// Request extractors
///
/// `ValidatedJson` and `ValidatedQuery` wrap axum's `Json` and `Query`,
/// run `validator::Validate` on the decoded value, and turn every failure
/// (malformed JSON, missing content type, unknown enum value, failed length
/// or range check) into a 422 `ApiError::ValidationError`.

use crate::http::error::{ApiError, ValidationErrorDetail};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Query string that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::ValidationError(vec![ValidationErrorDetail::new(
                    "body",
                    rejection.body_text(),
                )])
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::ValidationError(vec![ValidationErrorDetail::new(
                    "query",
                    rejection.body_text(),
                )])
            })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}
