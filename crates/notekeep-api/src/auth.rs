//! Bearer-token authentication.
//!
//! [`require_auth`] runs in front of every note route. It resolves the
//! `Authorization: Bearer <token>` header through the configured
//! [`IdentityResolver`] and stores the resulting [`AuthUser`] in the request
//! extensions, so handlers never see an anonymous request.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use notekeep_core::logging::OP_AUTHENTICATE;
use notekeep_core::{AuthUser, Error, IdentityResolver, Result};

use crate::error::{ApiError, OperationContext};
use crate::AppState;

/// Token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> std::result::Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        debug!(subsystem = "auth", "Missing bearer token");
        return Err(ApiError::unauthorized());
    };

    let user = state
        .identity
        .resolve(&token)
        .await
        .context(OP_AUTHENTICATE, "Failed to authenticate request")?
        .ok_or_else(ApiError::unauthorized)?;

    debug!(subsystem = "auth", user_id = %user.id, "Request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Fixed token table, configured as `AUTH_TOKENS=token=user,token2=user2`.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, String>,
}

impl StaticTokenResolver {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut tokens = HashMap::new();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (token, user) = pair
                .split_once('=')
                .map(|(t, u)| (t.trim(), u.trim()))
                .filter(|(t, u)| !t.is_empty() && !u.is_empty())
                .ok_or_else(|| {
                    Error::Config(format!("AUTH_TOKENS entry '{}' is not token=user", pair))
                })?;
            tokens.insert(token.to_string(), user.to_string());
        }
        if tokens.is_empty() {
            return Err(Error::Config("AUTH_TOKENS has no entries".to_string()));
        }
        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>> {
        Ok(self.tokens.get(token).cloned().map(AuthUser::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers_with("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers_with("bearer abc123")), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer    ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_static_resolver_parse() {
        let resolver = StaticTokenResolver::parse("t1=alice, t2 = bob ,").unwrap();
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_static_resolver_parse_rejects_malformed() {
        assert!(matches!(
            StaticTokenResolver::parse("t1alice"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            StaticTokenResolver::parse("=alice"),
            Err(Error::Config(_))
        ));
        assert!(matches!(StaticTokenResolver::parse(" , "), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_static_resolver_resolves_known_tokens_only() {
        let resolver = StaticTokenResolver::parse("t1=alice").unwrap();
        let user = resolver.resolve("t1").await.unwrap();
        assert_eq!(user.map(|u| u.id), Some("alice".to_string()));
        assert!(resolver.resolve("t2").await.unwrap().is_none());
    }
}
