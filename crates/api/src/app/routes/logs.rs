//! Admin views over the application log files.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use stockroom_auth::GatedView;
use stockroom_reports::{self as reports, LogsExport};

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::exports::{JSON, PDF, document};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(view_logs))
        .route("/export.json", get(export_logs_json))
        .route("/export.pdf", get(export_logs_pdf))
        .route("/clear", post(clear_logs))
}

pub async fn view_logs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::Logs) {
        return errors::authz_error_to_response(e);
    }
    let contents = services.logs.read();
    Json(dto::LogsView {
        general: contents.general,
        errors: contents.errors,
    })
    .into_response()
}

pub async fn export_logs_json(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::Logs) {
        return errors::authz_error_to_response(e);
    }
    let (general, error_lines) = services.logs.lines();
    match reports::logs_json(&LogsExport {
        general,
        errors: error_lines,
    }) {
        Ok(bytes) => document(JSON, "attachment; filename=\"logs.json\"", bytes),
        Err(e) => errors::internal("logs json export", e),
    }
}

pub async fn export_logs_pdf(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::Logs) {
        return errors::authz_error_to_response(e);
    }
    let (general, error_lines) = services.logs.lines();
    match reports::render(&reports::logs_report(&general, &error_lines)) {
        Ok(bytes) => document(PDF, "attachment; filename=\"logs.pdf\"", bytes),
        Err(e) => errors::internal("logs pdf export", e),
    }
}

pub async fn clear_logs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::Logs) {
        return errors::authz_error_to_response(e);
    }
    match services.logs.clear() {
        Ok(()) => {
            tracing::warn!(user = principal.username(), "log files cleared");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::internal("log clear", e),
    }
}
