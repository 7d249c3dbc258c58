use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use stockroom_auth::allowed_views;

use crate::app::dto;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(dto::WhoAmI {
        id: principal.user_id().get(),
        username: principal.username().to_string(),
        role: principal.role().as_str(),
        allowed_views: allowed_views(principal.role())
            .into_iter()
            .map(|v| v.to_string())
            .collect(),
    })
}
