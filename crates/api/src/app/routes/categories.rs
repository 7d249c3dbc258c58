use std::sync::Arc;

use axum::{
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use stockroom_auth::GatedView;
use stockroom_core::CategoryId;
use stockroom_products::{CategoryPatch, NewCategory};

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::common::{json_body, valid};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .patch(patch_category)
                .delete(delete_category),
        )
}

pub async fn list_categories(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.store.list_categories().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store.get_category(id).await {
        Ok(c) => Json(c).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::CategoryWrite) {
        return errors::authz_error_to_response(e);
    }
    let new = match json_body(body).and_then(|b| valid(b.validated())) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.create_category(new).await {
        Ok(c) => {
            tracing::info!(category_id = %c.id, user = principal.username(), "category created");
            (StatusCode::CREATED, Json(c)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::CategoryWrite) {
        return errors::authz_error_to_response(e);
    }
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let new = match json_body(body).and_then(|b| valid(b.validated())) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.update_category(id, new).await {
        Ok(c) => {
            tracing::info!(category_id = %c.id, user = principal.username(), "category updated");
            Json(c).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn patch_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<CategoryPatch>, JsonRejection>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::CategoryWrite) {
        return errors::authz_error_to_response(e);
    }
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let patch = match json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let current = match services.store.get_category(id).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };
    let new = match valid(patch.merge(&current)) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.update_category(id, new).await {
        Ok(c) => Json(c).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::CategoryWrite) {
        return errors::authz_error_to_response(e);
    }
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.delete_category(id).await {
        Ok(()) => {
            tracing::info!(category_id = %id, user = principal.username(), "category deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
