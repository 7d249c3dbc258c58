use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{CategoryId, DomainResult, Entity, FieldErrors, ProductId};

use crate::text::check_name;

/// Products at or below this stock level are flagged on dashboards.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Largest price accepted: 10 digits with 2 of them after the decimal point.
const PRICE_INTEGER_DIGITS: u32 = 8;
const PRICE_SCALE: u32 = 2;

/// A catalog product.
///
/// `stock` is never written through the catalog payloads; it only moves as a
/// side effect of recording an inventory movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "categoria")]
    pub category: CategoryId,
    pub stock: i64,
}

impl Product {
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock <= threshold
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Create / full-update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "categoria")]
    pub category: CategoryId,
}

impl NewProduct {
    /// Validate and normalize: trimmed name, price rescaled to two places.
    ///
    /// Whether `category` exists is a storage question and is checked there.
    pub fn validated(self) -> DomainResult<Self> {
        let mut errors = FieldErrors::new();
        let name = check_name("nombre", &self.name, &mut errors);
        let price = check_price(self.price, &mut errors);
        errors.into_result()?;
        Ok(Self {
            name,
            description: self.description,
            price,
            category: self.category,
        })
    }

    /// Build the stored product. New products start with zero stock.
    pub fn into_product(self, id: ProductId, stock: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock,
        }
    }
}

/// Partial-update payload; absent fields are left untouched.
///
/// `description` is `Some(None)` for an explicit `null`, which clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(
        rename = "descripcion",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(rename = "precio", default)]
    pub price: Option<Decimal>,
    #[serde(rename = "categoria", default)]
    pub category: Option<CategoryId>,
}

impl ProductPatch {
    /// Merge onto an existing product, producing a validated full payload.
    pub fn merge(self, current: &Product) -> DomainResult<NewProduct> {
        NewProduct {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            price: self.price.unwrap_or(current.price),
            category: self.category.unwrap_or(current.category),
        }
        .validated()
    }
}

/// Marks a field as present, keeping `null` distinct from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn check_price(price: Decimal, errors: &mut FieldErrors) -> Decimal {
    let normalized = price.normalize();
    if normalized.is_sign_negative() && !normalized.is_zero() {
        errors.add("precio", "ensure this value is greater than or equal to 0");
    }
    if normalized.scale() > PRICE_SCALE {
        errors.add(
            "precio",
            format!("ensure that there are no more than {PRICE_SCALE} decimal places"),
        );
    }
    if normalized.trunc().abs() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        errors.add(
            "precio",
            format!("ensure that there are no more than {PRICE_INTEGER_DIGITS} digits before the decimal point"),
        );
    }

    let mut scaled = normalized;
    scaled.rescale(PRICE_SCALE);
    scaled
}
