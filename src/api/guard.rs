use axum::{
    extract::{Request, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::{AppState, assets};
use crate::auth::cookie;

/// Login and register redirect home when the visitor is already signed in.
fn is_auth_route(path: &str) -> bool {
    path.starts_with("/login") || path.starts_with("/register")
}

/// The home page and everything under /profile require a session.
fn is_protected_route(path: &str) -> bool {
    !is_auth_route(path) && (path == "/" || path.starts_with("/profile"))
}

/// Gate for every navigational request. API routes are nested under
/// /api and never reach this fallback; they authorize themselves.
///
/// A missing cookie and a failed verification read the same here:
/// unauthenticated. This never produces an error response, only a
/// redirect or the asset itself.
pub async fn guard_navigation(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let path = request.uri().path().to_string();

    let authenticated = cookie::session_token(request.headers())
        .and_then(|token| state.tokens.verify(&token))
        .is_some();

    if is_protected_route(&path) && !authenticated {
        let target = format!("/login?redirect={}", urlencoding::encode(&path));
        return Redirect::temporary(&target).into_response();
    }

    if is_auth_route(&path) && authenticated {
        return Redirect::temporary("/").into_response();
    }

    assets::serve_asset(request.uri().clone())
        .await
        .into_response()
}
