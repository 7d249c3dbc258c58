use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use stockroom_auth::GatedView;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/empleado", get(employee_dashboard))
}

/// Admin only: every product and every movement, newest first.
pub async fn admin_dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::AdminDashboard) {
        return errors::authz_error_to_response(e);
    }

    let productos = match services.store.list_products().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let inventarios = match services.store.list_movements().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };

    Json(dto::AdminDashboard { productos, inventarios }).into_response()
}

/// Everyone but secretaries: catalog plus the low-stock list.
pub async fn employee_dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(e) = authz::authorize(&principal, GatedView::EmployeeDashboard) {
        return errors::authz_error_to_response(e);
    }

    let productos = match services.store.list_products().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let categorias = match services.store.list_categories().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let productos_bajo_stock = dto::low_stock(&productos, services.low_stock_threshold);

    Json(dto::EmployeeDashboard {
        productos,
        categorias,
        productos_bajo_stock,
    })
    .into_response()
}
