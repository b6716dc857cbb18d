//! Static bearer-token authentication.
//!
//! Resolves the `Authorization: Bearer <token>` header against the configured
//! token table and attaches the matching [`SecurityContext`] to the request.
//! Requests without a valid token pass through without a context; protected
//! routes reject them via `host_security::require_right`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use host_security::SecurityContext;

use crate::config::AuthConfig;

#[derive(Clone)]
pub struct AuthState {
    disabled: bool,
    tokens: Arc<HashMap<String, SecurityContext>>,
}

impl AuthState {
    #[must_use]
    pub fn from_config(cfg: &AuthConfig) -> Self {
        let tokens = cfg
            .tokens
            .iter()
            .map(|grant| {
                let ctx = SecurityContext::builder()
                    .subject(&grant.subject)
                    .rights(grant.rights.iter().cloned())
                    .build();
                (grant.token.clone(), ctx)
            })
            .collect();
        Self {
            disabled: cfg.auth_disabled,
            tokens: Arc::new(tokens),
        }
    }

    fn resolve(&self, headers: &HeaderMap) -> Option<SecurityContext> {
        if self.disabled {
            return Some(SecurityContext::root());
        }
        let token = bearer_token(headers)?;
        let ctx = self.tokens.get(token).cloned();
        if ctx.is_none() {
            tracing::warn!("Rejected unknown bearer token");
        }
        ctx
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Attach the caller's [`SecurityContext`], if any, to request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(ctx) = state.resolve(req.headers()) {
        tracing::debug!(subject = %ctx.subject(), "Authenticated request");
        req.extensions_mut().insert(ctx);
    }
    next.run(req).await
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::TokenGrant;
    use axum::http::HeaderValue;
    use host_security::Right;

    fn state(disabled: bool) -> AuthState {
        AuthState::from_config(&AuthConfig {
            auth_disabled: disabled,
            tokens: vec![TokenGrant {
                token: "viewer-token".to_owned(),
                subject: "viewer".to_owned(),
                rights: vec![Right::view_identity()],
            }],
        })
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn known_token_resolves_to_its_subject() {
        let ctx = state(false).resolve(&headers("Bearer viewer-token")).unwrap();
        assert_eq!(ctx.subject(), "viewer");
        assert!(ctx.has_right(&Right::view_identity()));
    }

    #[test]
    fn unknown_or_malformed_tokens_resolve_to_nothing() {
        let state = state(false);
        assert!(state.resolve(&HeaderMap::new()).is_none());
        assert!(state.resolve(&headers("Bearer nope")).is_none());
        assert!(state.resolve(&headers("Basic dmlld2VyOnB3")).is_none());
        assert!(state.resolve(&headers("viewer-token")).is_none());
        assert!(state.resolve(&headers("Bearer ")).is_none());
    }

    #[test]
    fn disabled_auth_yields_root() {
        let ctx = state(true).resolve(&HeaderMap::new()).unwrap();
        assert!(ctx.is_root());
    }
}
