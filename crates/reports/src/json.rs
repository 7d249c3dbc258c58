//! JSON export documents.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use stockroom_inventory::MovementDetail;
use stockroom_products::Product;

/// One product in a JSON export. `precio` is emitted as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductExport {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: f64,
    pub stock: i64,
    pub categoria: i64,
}

impl From<&Product> for ProductExport {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.get(),
            nombre: p.name.clone(),
            descripcion: p.description.clone(),
            precio: p.price.to_f64().unwrap_or_default(),
            stock: p.stock,
            categoria: p.category.get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementExport {
    pub id: i64,
    pub tipo: &'static str,
    pub producto: i64,
    pub producto_nombre: String,
    pub cantidad: i64,
    pub fecha_actualizacion: String,
}

impl From<&MovementDetail> for MovementExport {
    fn from(d: &MovementDetail) -> Self {
        let m = &d.movement;
        Self {
            id: m.id.get(),
            tipo: m.kind.as_str(),
            producto: m.product.get(),
            producto_nombre: d.product_name.clone(),
            cantidad: m.quantity,
            fecha_actualizacion: iso8601(m.recorded_at),
        }
    }
}

/// Contents of both log files, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogsExport {
    pub general: Vec<String>,
    pub errors: Vec<String>,
}

fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn products_json(products: &[Product]) -> serde_json::Result<Vec<u8>> {
    let rows: Vec<ProductExport> = products.iter().map(ProductExport::from).collect();
    serde_json::to_vec_pretty(&rows)
}

pub fn movements_json(movements: &[MovementDetail]) -> serde_json::Result<Vec<u8>> {
    let rows: Vec<MovementExport> = movements.iter().map(MovementExport::from).collect();
    serde_json::to_vec_pretty(&rows)
}

pub fn logs_json(logs: &LogsExport) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(logs)
}
