//! In-memory store for dev and tests.
//!
//! All state sits behind one `RwLock`, so recording a movement (read stock,
//! apply the ledger rule, write stock, insert movement) happens under a single
//! write guard and cannot interleave with another writer.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use stockroom_auth::{NewStaffUser, StaffUser};
use stockroom_core::{CategoryId, Entity, MovementId, ProductId, UserId};
use stockroom_inventory::{InventoryMovement, MovementDetail, NewMovement, ledger};
use stockroom_products::{Category, NewCategory, NewProduct, Product};

use super::{
    CategoryRepository, MovementRepository, ProductRepository, RecordedMovement, StoreError, UserRepository,
};

#[derive(Debug, Default)]
struct Counters {
    category: i64,
    product: i64,
    movement: i64,
    user: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Default)]
struct State {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    movements: BTreeMap<MovementId, InventoryMovement>,
    users: BTreeMap<UserId, StaffUser>,
    counters: Counters,
}

impl State {
    fn detail(&self, movement: &InventoryMovement) -> MovementDetail {
        MovementDetail {
            movement: movement.clone(),
            product_name: self
                .products
                .get(&movement.product)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
        }
    }

    fn remove_product_cascade(&mut self, id: ProductId) {
        self.products.remove(&id);
        self.movements.retain(|_, m| m.product != id);
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("read", "in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("write", "in-memory store lock poisoned"))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.read()?.categories.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category, StoreError> {
        let mut state = self.write()?;
        let id = CategoryId::new(next(&mut state.counters.category));
        let category = new.into_category(id);
        state.categories.insert(category.id(), category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: CategoryId, new: NewCategory) -> Result<Category, StoreError> {
        let mut state = self.write()?;
        let slot = state.categories.get_mut(&id).ok_or(StoreError::NotFound)?;
        *slot = new.into_category(id);
        Ok(slot.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let mut state = self.write()?;
        state.categories.remove(&id).ok_or(StoreError::NotFound)?;

        let owned: Vec<ProductId> = state
            .products
            .values()
            .filter(|p| p.category == id)
            .map(|p| p.id)
            .collect();
        for product_id in owned {
            state.remove_product_cascade(product_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.read()?.products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, StoreError> {
        self.read()?.products.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        if !state.categories.contains_key(&new.category) {
            return Err(StoreError::dangling_reference("categoria", new.category));
        }
        let id = ProductId::new(next(&mut state.counters.product));
        let product = new.into_product(id, 0);
        state.products.insert(product.id(), product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, new: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        if !state.categories.contains_key(&new.category) {
            return Err(StoreError::dangling_reference("categoria", new.category));
        }
        let slot = state.products.get_mut(&id).ok_or(StoreError::NotFound)?;
        *slot = new.into_product(id, slot.stock);
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if !state.products.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        state.remove_product_cascade(id);
        Ok(())
    }

    async fn list_low_stock(&self, threshold: i64) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .read()?
            .products
            .values()
            .filter(|p| p.is_low_stock(threshold))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MovementRepository for InMemoryStore {
    async fn list_movements(&self) -> Result<Vec<MovementDetail>, StoreError> {
        let state = self.read()?;
        let mut details: Vec<MovementDetail> = state.movements.values().map(|m| state.detail(m)).collect();
        details.sort_by(|a, b| {
            b.movement
                .recorded_at
                .cmp(&a.movement.recorded_at)
                .then(b.movement.id.cmp(&a.movement.id))
        });
        Ok(details)
    }

    async fn get_movement(&self, id: MovementId) -> Result<MovementDetail, StoreError> {
        let state = self.read()?;
        let movement = state.movements.get(&id).ok_or(StoreError::NotFound)?;
        Ok(state.detail(movement))
    }

    async fn record_movement(&self, new: NewMovement) -> Result<RecordedMovement, StoreError> {
        let mut state = self.write()?;

        let current = state
            .products
            .get(&new.product)
            .map(|p| p.stock)
            .ok_or_else(|| StoreError::dangling_reference("producto", new.product))?;
        let stock = ledger::apply(current, new.kind, new.quantity)?;

        let id = MovementId::new(next(&mut state.counters.movement));
        let movement = new.into_movement(id, Utc::now());

        let product = match state.products.get_mut(&movement.product) {
            Some(p) => {
                p.stock = stock;
                p.clone()
            }
            None => return Err(StoreError::dangling_reference("producto", movement.product)),
        };
        state.movements.insert(movement.id(), movement.clone());

        tracing::debug!(
            movement_id = %id,
            product_id = %product.id,
            kind = %movement.kind,
            quantity = movement.quantity,
            stock = product.stock,
            "movement recorded"
        );
        Ok(RecordedMovement { movement, product })
    }

    async fn delete_movement(&self, id: MovementId) -> Result<(), StoreError> {
        self.write()?.movements.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<StaffUser>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, new: NewStaffUser) -> Result<StaffUser, StoreError> {
        let mut state = self.write()?;
        if state.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::Conflict(format!("username '{}' already exists", new.username)));
        }
        let id = UserId::new(next(&mut state.counters.user));
        let user = new.into_user(id)?;
        state.users.insert(id, user.clone());
        Ok(user)
    }
}
