use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use std::convert::Infallible;

/// The raw bearer token from the Authorization header, if any. The
/// extractor never rejects a request; each operation decides for itself
/// whether a missing or invalid token matters.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Option<String>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(strip_bearer)
            .map(str::to_owned);

        Ok(BearerToken(token))
    }
}

// Scheme matching is case-insensitive.
fn strip_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_at_checked(7)?;
    scheme.eq_ignore_ascii_case("bearer ").then_some(token)
}
