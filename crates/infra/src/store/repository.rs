//! Repository seams, one per resource.
//!
//! Handlers depend on these traits only; the in-memory and Postgres stores
//! implement all of them and are used through the `Store` super-trait.

use async_trait::async_trait;

use stockroom_auth::{NewStaffUser, StaffUser};
use stockroom_core::{CategoryId, MovementId, ProductId};
use stockroom_inventory::{InventoryMovement, MovementDetail, NewMovement};
use stockroom_products::{Category, NewCategory, NewProduct, Product};

use super::StoreError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    async fn get_category(&self, id: CategoryId) -> Result<Category, StoreError>;
    async fn create_category(&self, new: NewCategory) -> Result<Category, StoreError>;
    async fn update_category(&self, id: CategoryId, new: NewCategory) -> Result<Category, StoreError>;
    /// Deletes the category and, by cascade, its products and their movements.
    async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
    async fn get_product(&self, id: ProductId) -> Result<Product, StoreError>;
    /// New products start with zero stock.
    async fn create_product(&self, new: NewProduct) -> Result<Product, StoreError>;
    /// Rewrites catalog fields only; stock is preserved.
    async fn update_product(&self, id: ProductId, new: NewProduct) -> Result<Product, StoreError>;
    /// Deletes the product and, by cascade, its movements.
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
    /// Products with `stock <= threshold`, ordered by id.
    async fn list_low_stock(&self, threshold: i64) -> Result<Vec<Product>, StoreError>;
}

/// Result of recording a movement: the stored movement and the product's
/// stock after the ledger rule was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMovement {
    pub movement: InventoryMovement,
    pub product: Product,
}

#[async_trait]
pub trait MovementRepository: Send + Sync {
    /// Newest first.
    async fn list_movements(&self) -> Result<Vec<MovementDetail>, StoreError>;
    async fn get_movement(&self, id: MovementId) -> Result<MovementDetail, StoreError>;
    /// Apply the stock ledger rule and store the movement as one atomic unit.
    ///
    /// On any error neither the product's stock nor the movement is persisted.
    async fn record_movement(&self, new: NewMovement) -> Result<RecordedMovement, StoreError>;
    /// Removes the record only; stock is not reverted.
    async fn delete_movement(&self, id: MovementId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<StaffUser>, StoreError>;
    /// Fails with `Conflict` when the username is taken.
    async fn create_user(&self, new: NewStaffUser) -> Result<StaffUser, StoreError>;
}

/// Everything the API needs from persistence.
pub trait Store: CategoryRepository + ProductRepository + MovementRepository + UserRepository {}

impl<T> Store for T where T: CategoryRepository + ProductRepository + MovementRepository + UserRepository {}
