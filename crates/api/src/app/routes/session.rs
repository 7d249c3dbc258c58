//! Login, logout and the landing page.

use std::sync::Arc;

use axum::{
    extract::{Extension, FromRequest, Request},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde_json::json;


use crate::app::dto::{self, LoginRequest};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware::{SESSION_COOKIE, session_principal};

/// Header carrying the freshly issued token, for non-browser clients.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Landing page: the low-stock list for signed-in users, otherwise a redirect
/// to the login page.
pub async fn index(Extension(services): Extension<Arc<AppServices>>, headers: HeaderMap) -> Response {
    let Some(principal) = session_principal(&headers, services.jwt.as_ref()) else {
        return Redirect::to("/login").into_response();
    };

    let mut res = match services.store.list_low_stock(services.low_stock_threshold).await {
        Ok(productos_bajo_stock) => Json(dto::IndexContext { productos_bajo_stock }).into_response(),
        Err(e) => errors::store_error_to_response(e),
    };
    res.extensions_mut().insert(PrincipalContext::new(principal));
    res
}

pub async fn login_form() -> Response {
    Json(json!({
        "fields": ["username", "password"],
        "accepts": ["application/x-www-form-urlencoded", "application/json"],
    }))
    .into_response()
}

pub async fn login(Extension(services): Extension<Arc<AppServices>>, req: Request) -> Response {
    let creds = match read_credentials(req).await {
        Ok(c) => c,
        Err(res) => return res,
    };
    let username = creds.username.trim();

    let user = match services.store.find_user_by_username(username).await {
        Ok(u) => u,
        Err(e) => return errors::store_error_to_response(e),
    };
    let Some(user) = user.filter(|u| u.check_password(&creds.password)) else {
        tracing::warn!(username, "failed login attempt");
        return errors::json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", "Credenciales inválidas");
    };

    let principal = user.principal();
    let token = match services.jwt.issue(&principal, Utc::now()) {
        Ok(t) => t,
        Err(e) => return errors::internal("session token issue", e),
    };

    let cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        services.jwt.ttl().num_seconds()
    );
    let (Ok(cookie), Ok(token)) = (HeaderValue::from_str(&cookie), HeaderValue::from_str(&token)) else {
        return errors::internal("session cookie", "token is not a valid header value");
    };

    tracing::info!(username = %principal.username, role = %principal.role, "user logged in");

    let mut res = Redirect::to("/").into_response();
    res.headers_mut().insert(header::SET_COOKIE, cookie);
    res.headers_mut().insert(SESSION_TOKEN_HEADER, token);
    res.extensions_mut().insert(PrincipalContext::new(principal));
    res
}

/// Stateless: expires the session cookie and sends the client to the login page.
pub async fn logout(headers: HeaderMap, Extension(services): Extension<Arc<AppServices>>) -> Response {
    let mut res = Redirect::to("/login").into_response();
    res.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("session=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"),
    );
    if let Some(principal) = session_principal(&headers, services.jwt.as_ref()) {
        tracing::info!(username = %principal.username, "user logged out");
        res.extensions_mut().insert(PrincipalContext::new(principal));
    }
    res
}

async fn read_credentials(req: Request) -> Result<LoginRequest, Response> {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json {
        Json::<LoginRequest>::from_request(req, &())
            .await
            .map(|Json(c)| c)
            .map_err(errors::json_rejection)
    } else {
        Form::<LoginRequest>::from_request(req, &())
            .await
            .map(|Form(c)| c)
            .map_err(errors::form_rejection)
    }
}
