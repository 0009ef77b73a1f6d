use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// Raw token from the Authorization header, empty when absent.
/// Verification is left to the business layer.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(extract_token_from_headers(&parts.headers)))
    }
}

/// Accepts both `Bearer <token>` and a bare token
fn extract_token_from_headers(headers: &HeaderMap) -> String {
    let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };

    let value = value.trim_start();
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim()
        .to_string()
}
