//! Export formatters: JSON documents and paginated PDF reports.

pub mod json;
pub mod layout;
pub mod pdf;

pub use json::{LogsExport, MovementExport, ProductExport, logs_json, movements_json, products_json};
pub use layout::{Column, PageLayout, Placed, Report, layout};
pub use pdf::{ReportError, logs_report, movements_report, products_report, render};
