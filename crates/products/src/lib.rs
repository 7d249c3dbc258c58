//! Products domain module.
//!
//! Catalog entities (categories and products) and the validation rules for
//! their payloads, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod category;
pub mod product;

mod text;

pub use category::{Category, CategoryPatch, NewCategory};
pub use product::{DEFAULT_LOW_STOCK_THRESHOLD, NewProduct, Product, ProductPatch};
pub use text::MAX_NAME_LEN;
