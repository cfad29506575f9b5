use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use procdash_core::{RouteDecision, RouteGuard};

/// Whether the request carries a non-empty cookie with the given name.
///
/// Presence only. The value is never validated here; the supervisor
/// backend enforces real authorization on every API call.
pub fn has_named_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(k, v)| k == name && !v.is_empty())
}

/// Route guard middleware.
///
/// Runs in front of every page navigation: exempt infrastructure
/// prefixes pass straight through, public paths and cookie-bearing
/// requests are forwarded, everything else is redirected to the login
/// page. The decision reads nothing but the path and the cookie header.
pub async fn route_guard_middleware(
    State(guard): State<Arc<RouteGuard>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();
    let has_cookie = has_named_cookie(req.headers(), guard.cookie_name());

    match guard.check(path, has_cookie) {
        RouteDecision::Allow => next.run(req).await,
        RouteDecision::RedirectTo(target) => Redirect::temporary(&target).into_response(),
    }
}
