use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::ApiError;

/// Numeric record id taken from the path.
///
/// A segment that is not an integer names no record, so it is rejected as
/// not found rather than as a malformed request.
pub struct RecordId(pub i32);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Unparseable record id");
                Err(ApiError::NotFound("Resource not found".to_string()))
            }
        }
    }
}
