use axum::response::Response;
use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;
use stockroom_inventory::MovementDetail;
use stockroom_products::{Category, Product};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub id: i64,
    pub username: String,
    pub role: &'static str,
    pub allowed_views: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub productos_bajo_stock: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub productos: Vec<Product>,
    pub inventarios: Vec<MovementDetail>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeDashboard {
    pub productos: Vec<Product>,
    pub categorias: Vec<Category>,
    pub productos_bajo_stock: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct LogsView {
    pub general: String,
    pub errors: String,
}

// -------------------------
// Mapping helpers
// -------------------------

/// Parse a path id such as `ProductId` or `CategoryId`; non-numeric or
/// non-positive ids become a 400.
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}

/// Low-stock subset of an already loaded product list.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_low_stock(threshold))
        .cloned()
        .collect()
}
