use std::sync::Arc;

use axum::{
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use stockroom_core::MovementId;
use stockroom_inventory::NewMovement;

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::common::{json_body, valid};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_movements).post(create_movement))
        .route(
            "/:id",
            get(get_movement)
                .delete(delete_movement)
                .put(reject_edit)
                .patch(reject_edit),
        )
}

/// Newest first.
pub async fn list_movements(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.store.list_movements().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: MovementId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store.get_movement(id).await {
        Ok(m) => Json(m).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Record a movement; the product's stock changes in the same atomic step.
pub async fn create_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewMovement>, JsonRejection>,
) -> Response {
    let new = match json_body(body).and_then(|b| valid(b.validated())) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.record_movement(new).await {
        Ok(recorded) => {
            tracing::info!(
                movement_id = %recorded.movement.id,
                product_id = %recorded.product.id,
                kind = %recorded.movement.kind,
                quantity = recorded.movement.quantity,
                stock = recorded.product.stock,
                user = principal.username(),
                "inventory movement recorded"
            );
            (StatusCode::CREATED, Json(recorded.movement)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, user = principal.username(), "inventory movement rejected");
            errors::store_error_to_response(e)
        }
    }
}

/// Movements are immutable once recorded.
pub async fn reject_edit() -> Response {
    errors::json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "immutable",
        "inventory movements cannot be edited; record a compensating movement instead",
    )
}

pub async fn delete_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    let id: MovementId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.delete_movement(id).await {
        Ok(()) => {
            tracing::info!(movement_id = %id, user = principal.username(), "inventory movement deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
