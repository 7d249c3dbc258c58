use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use stockroom_auth::{JwtValidator, Principal};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Require a valid session token (bearer header or session cookie).
///
/// The principal is attached to the request for handlers and to the response
/// for the request logger.
pub async fn auth_middleware(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let Some(principal) = session_principal(req.headers(), state.jwt.as_ref()) else {
        return errors::unauthenticated();
    };

    let ctx = PrincipalContext::new(principal);
    req.extensions_mut().insert(ctx.clone());

    let mut res = next.run(req).await;
    res.extensions_mut().insert(ctx);
    res
}

/// Resolve the principal from request headers, if any valid token is present.
pub fn session_principal(headers: &HeaderMap, jwt: &dyn JwtValidator) -> Option<Principal> {
    let token = extract_bearer(headers).or_else(|| extract_session_cookie(headers))?;
    match jwt.validate(token, Utc::now()) {
        Ok(claims) => Some(claims.principal()),
        Err(e) => {
            tracing::debug!(error = %e, "rejected session token");
            None
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

fn extract_session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find(|token| !token.is_empty())
}

/// Log every request with method, path, status, duration, user and remote
/// address. Responses with status >= 400 are repeated at error level.
pub async fn request_logging(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let duration = started.elapsed();
    let user = res
        .extensions()
        .get::<PrincipalContext>()
        .map(|p| p.username().to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    tracing::info!(
        %method,
        path = %path,
        status,
        duration_ms = duration.as_millis() as u64,
        user = %user,
        remote_addr = %remote_addr,
        "{method} {path} - Status: {status} - Duration: {:.2}s - User: {user}",
        duration.as_secs_f64()
    );
    if status >= 400 {
        tracing::error!(
            %method,
            path = %path,
            status,
            user = %user,
            remote_addr = %remote_addr,
            "Error {status} on {method} {path} - User: {user} - IP: {remote_addr}"
        );
    }

    res
}
