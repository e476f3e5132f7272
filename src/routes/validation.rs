use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::constants::missing_property;
use crate::error::AppError;

/// JSON body extractor whose rejections render as the API's `{ "error": ... }` shape
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path extractor whose rejections render as the API's `{ "error": ... }` shape
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Query-string extractor whose rejections render as the API's `{ "error": ... }` shape
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Require a non-blank string field
pub fn require_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::Validation(missing_property(field))),
    }
}

/// Require a field to be present
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(missing_property(field)))
}

/// Reject a present-but-blank string in a partial update
pub fn reject_blank(value: &Option<String>, field: &str) -> Result<(), AppError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(AppError::Validation(format!(
            "The {} property must not be empty.",
            field
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("Pong".into()), "game_title").unwrap(), "Pong");

        for value in [None, Some(String::new()), Some("   ".into())] {
            match require_text(value, "game_title") {
                Err(AppError::Validation(msg)) => {
                    assert_eq!(msg, "You are missing the game_title property.")
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_require() {
        assert_eq!(require(Some(3), "rank").unwrap(), 3);
        assert!(matches!(
            require::<i64>(None, "rank"),
            Err(AppError::Validation(msg)) if msg.contains("rank")
        ));
    }

    #[test]
    fn test_reject_blank() {
        assert!(reject_blank(&None, "handle").is_ok());
        assert!(reject_blank(&Some("ace".into()), "handle").is_ok());
        assert!(reject_blank(&Some(" ".into()), "handle").is_err());
    }
}
