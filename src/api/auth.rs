//! Session-token authentication middleware.
//!
//! - Registration (`POST /api/users`) issues an opaque session token
//! - Every protected endpoint requires `X-Session-Token: <token>`
//! - The token never expires and is never rotated
//!
//! The server never decodes the token; it only matches it against the
//! user store.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use super::routes::AppState;

/// Header carrying the caller's session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// The authenticated caller, injected as a request extension by
/// [`require_session`] so handlers never see the raw token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Middleware guarding the protected routes.
///
/// Resolves the session token to a user id before the handler runs;
/// a missing or unknown token short-circuits with 401.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if token.is_empty() {
        return (StatusCode::UNAUTHORIZED, "Missing X-Session-Token header").into_response();
    }

    match state.users.authenticate(token).await {
        Ok(id) => {
            req.extensions_mut().insert(AuthUser { id });
            next.run(req).await
        }
        Err(err) => (StatusCode::UNAUTHORIZED, err.to_string()).into_response(),
    }
}
