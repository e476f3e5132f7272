use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::{
    ERR_INVALID_TOKEN, ERR_MISSING_TOKEN, ERR_NOT_ADMIN, MAX_GATED_BODY_BYTES, TOKEN_FIELD,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Admin gate for mutating endpoints
///
/// Looks for a token in the JSON body, then the `token` query parameter, then
/// the `Authorization` header. Every failure returns 403 before the handler
/// runs. On success the verified [`Claims`](crate::security::Claims) are
/// placed in the request extensions and the buffered body is handed on.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_GATED_BODY_BYTES)
        .await
        .map_err(|_| AppError::PayloadTooLarge)?;

    let Some(token) = extract_token(&bytes, &parts.uri, &parts.headers) else {
        tracing::warn!("Rejected {} {}: no token", parts.method, parts.uri.path());
        return Err(AppError::Forbidden(ERR_MISSING_TOKEN.to_string()));
    };

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("Rejected {} {}: {}", parts.method, parts.uri.path(), e);
        AppError::Forbidden(ERR_INVALID_TOKEN.to_string())
    })?;

    if !claims.admin {
        tracing::warn!(
            "Rejected {} {}: token for {} lacks admin claim",
            parts.method,
            parts.uri.path(),
            claims.app_name
        );
        return Err(AppError::Forbidden(ERR_NOT_ADMIN.to_string()));
    }

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Find a candidate token in body, query string or Authorization header, in that order
pub fn extract_token(body: &[u8], uri: &Uri, headers: &HeaderMap) -> Option<String> {
    token_from_body(body)
        .or_else(|| token_from_query(uri))
        .or_else(|| token_from_header(headers))
}

fn token_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    non_empty(value.get(TOKEN_FIELD)?.as_str()?)
}

fn token_from_query(uri: &Uri) -> Option<String> {
    let Query(query) = Query::<TokenQuery>::try_from_uri(uri).ok()?;
    non_empty(&query.token?)
}

fn token_from_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    non_empty(token)
}

fn non_empty(token: &str) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_body_token_takes_precedence() {
        let uri: Uri = "/api/v1/games?token=from-query".parse().unwrap();
        let body = br#"{"token":"from-body","game_title":"Pong"}"#;

        let token = extract_token(body, &uri, &headers_with("from-header"));
        assert_eq!(token.as_deref(), Some("from-body"));
    }

    #[test]
    fn test_query_token_before_header() {
        let uri: Uri = "/api/v1/games/1?token=from-query".parse().unwrap();

        let token = extract_token(b"", &uri, &headers_with("Bearer from-header"));
        assert_eq!(token.as_deref(), Some("from-query"));
    }

    #[test]
    fn test_header_token_with_and_without_bearer() {
        let uri: Uri = "/api/v1/games/1".parse().unwrap();

        assert_eq!(
            extract_token(b"", &uri, &headers_with("Bearer abc")).as_deref(),
            Some("abc")
        );
        assert_eq!(
            extract_token(b"", &uri, &headers_with("abc")).as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_no_token() {
        let uri: Uri = "/api/v1/games/1?other=1".parse().unwrap();
        let body = br#"{"token":""}"#;

        assert!(extract_token(body, &uri, &HeaderMap::new()).is_none());
        assert!(extract_token(b"not json", &uri, &HeaderMap::new()).is_none());
    }
}
