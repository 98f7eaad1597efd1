//! Bearer-token authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::UserService;
use crate::shared::errors::DomainError;

#[derive(Clone)]
pub struct AuthState {
    pub user_service: Arc<UserService>,
}

/// The caller resolved from a valid access token, stored in request
/// extensions for handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests without a live session. The token must verify and match
/// the one cached at login, so logout takes effect immediately.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);
    let Some(token) = token else {
        return DomainError::Unauthorized("missing bearer token".into()).into_response();
    };

    match auth_state.user_service.authenticate(&token).await {
        Ok(user_id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { user_id });
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}
