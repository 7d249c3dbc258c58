use std::sync::Arc;

use axum::{
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use stockroom_core::ProductId;
use stockroom_products::{NewProduct, ProductPatch};

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::common::{json_body, valid};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.store.list_products().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store.get_product(id).await {
        Ok(p) => Json(p).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Response {
    let new = match json_body(body).and_then(|b| valid(b.validated())) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.create_product(new).await {
        Ok(p) => {
            tracing::info!(product_id = %p.id, user = principal.username(), "product created");
            (StatusCode::CREATED, Json(p)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Response {
    let id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let new = match json_body(body).and_then(|b| valid(b.validated())) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.update_product(id, new).await {
        Ok(p) => {
            tracing::info!(product_id = %p.id, user = principal.username(), "product updated");
            Json(p).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn patch_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Response {
    let id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let patch = match json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let current = match services.store.get_product(id).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };
    let new = match valid(patch.merge(&current)) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.update_product(id, new).await {
        Ok(p) => {
            tracing::info!(product_id = %p.id, user = principal.username(), "product patched");
            Json(p).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.delete_product(id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, user = principal.username(), "product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
