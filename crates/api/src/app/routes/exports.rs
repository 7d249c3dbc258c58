//! PDF and JSON downloads of the catalog and the movement history.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use stockroom_reports as reports;

use crate::app::errors;
use crate::app::services::AppServices;

pub const PDF: &str = "application/pdf";
pub const JSON: &str = "application/json";

pub fn router() -> Router {
    Router::new()
        .route("/productos.pdf", get(products_pdf))
        .route("/inventarios.pdf", get(movements_pdf))
        .route("/productos.json", get(products_json))
        .route("/inventarios.json", get(movements_json))
}

/// A downloadable document with fixed content type and disposition.
pub fn document(content_type: &'static str, disposition: &'static str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

pub async fn products_pdf(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let products = match services.store.list_products().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    match reports::render(&reports::products_report(&products)) {
        Ok(bytes) => document(PDF, "inline; filename=\"reporte_productos.pdf\"", bytes),
        Err(e) => errors::internal("products pdf export", e),
    }
}

pub async fn movements_pdf(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let movements = match services.store.list_movements().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    match reports::render(&reports::movements_report(&movements)) {
        Ok(bytes) => document(PDF, "inline; filename=\"reporte_inventarios.pdf\"", bytes),
        Err(e) => errors::internal("movements pdf export", e),
    }
}

pub async fn products_json(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let products = match services.store.list_products().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    match reports::products_json(&products) {
        Ok(bytes) => document(JSON, "attachment; filename=\"productos.json\"", bytes),
        Err(e) => errors::internal("products json export", e),
    }
}

pub async fn movements_json(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let movements = match services.store.list_movements().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    match reports::movements_json(&movements) {
        Ok(bytes) => document(JSON, "attachment; filename=\"inventarios.json\"", bytes),
        Err(e) => errors::internal("movements json export", e),
    }
}
