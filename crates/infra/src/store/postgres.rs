//! Postgres-backed store.
//!
//! ## Stock consistency
//!
//! `record_movement` runs in one transaction that locks the product row with
//! `SELECT ... FOR UPDATE` before reading its stock. Concurrent movements for
//! the same product therefore serialize on that row lock; the ledger rule
//! always sees the committed stock of the previous writer.
//!
//! ## Schema
//!
//! `migrate()` applies `migrations/0001_init.sql`. The script is idempotent
//! (`IF NOT EXISTS`) and safe to run on every startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use stockroom_auth::{NewStaffUser, Role, StaffUser};
use stockroom_core::{CategoryId, MovementId, ProductId, UserId};
use stockroom_inventory::{InventoryMovement, MovementDetail, MovementKind, NewMovement, ledger};
use stockroom_products::{Category, NewCategory, NewProduct, Product};

use super::error::map_sqlx_error;
use super::{
    CategoryRepository, MovementRepository, ProductRepository, RecordedMovement, StoreError, UserRepository,
};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

const PRODUCT_COLUMNS: &str = "id, nombre, descripcion, precio, categoria_id, stock";

const MOVEMENT_DETAIL_SELECT: &str = r#"
    SELECT m.id, m.tipo, m.producto_id, m.cantidad, m.fecha_actualizacion, p.nombre AS producto_nombre
    FROM inventory_movements m
    JOIN products p ON p.id = m.producto_id
"#;

/// Postgres-backed implementation of every repository.
///
/// `PgPool` is internally reference counted, so cloning the store is cheap.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 AS one FROM categories WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("category_exists", e))?;
        Ok(row.is_some())
    }
}

fn decode_err(operation: &str, err: impl core::fmt::Display) -> StoreError {
    StoreError::backend(operation, format!("failed to decode row: {err}"))
}

fn category_from_row(row: &PgRow) -> Result<Category, StoreError> {
    Ok(Category {
        id: CategoryId::new(row.try_get("id").map_err(|e| decode_err("category", e))?),
        name: row.try_get("nombre").map_err(|e| decode_err("category", e))?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let get_err = |e: sqlx::Error| decode_err("product", e);
    Ok(Product {
        id: ProductId::new(row.try_get("id").map_err(get_err)?),
        name: row.try_get("nombre").map_err(get_err)?,
        description: row.try_get::<Option<String>, _>("descripcion").map_err(get_err)?,
        price: row.try_get::<Decimal, _>("precio").map_err(get_err)?,
        category: CategoryId::new(row.try_get("categoria_id").map_err(get_err)?),
        stock: row.try_get("stock").map_err(get_err)?,
    })
}

fn movement_detail_from_row(row: &PgRow) -> Result<MovementDetail, StoreError> {
    let get_err = |e: sqlx::Error| decode_err("movement", e);
    let kind: MovementKind = row
        .try_get::<String, _>("tipo")
        .map_err(get_err)?
        .parse()
        .map_err(|e| decode_err("movement", e))?;
    Ok(MovementDetail {
        movement: InventoryMovement {
            id: MovementId::new(row.try_get("id").map_err(get_err)?),
            kind,
            product: ProductId::new(row.try_get("producto_id").map_err(get_err)?),
            quantity: row.try_get("cantidad").map_err(get_err)?,
            recorded_at: row.try_get::<DateTime<Utc>, _>("fecha_actualizacion").map_err(get_err)?,
        },
        product_name: row.try_get("producto_nombre").map_err(get_err)?,
    })
}

fn user_from_row(row: &PgRow) -> Result<StaffUser, StoreError> {
    let get_err = |e: sqlx::Error| decode_err("user", e);
    Ok(StaffUser {
        id: UserId::new(row.try_get("id").map_err(get_err)?),
        username: row.try_get("username").map_err(get_err)?,
        password_hash: row.try_get("password_hash").map_err(get_err)?,
        role: Role::parse(&row.try_get::<String, _>("role").map_err(get_err)?),
    })
}

#[async_trait]
impl CategoryRepository for PostgresStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query("SELECT id, nombre FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_categories", e))?;
        rows.iter().map(category_from_row).collect()
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, StoreError> {
        let row = sqlx::query("SELECT id, nombre FROM categories WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_category", e))?
            .ok_or(StoreError::NotFound)?;
        category_from_row(&row)
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category, StoreError> {
        let row = sqlx::query("INSERT INTO categories (nombre) VALUES ($1) RETURNING id, nombre")
            .bind(&new.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_category", e))?;
        category_from_row(&row)
    }

    async fn update_category(&self, id: CategoryId, new: NewCategory) -> Result<Category, StoreError> {
        let row = sqlx::query("UPDATE categories SET nombre = $1 WHERE id = $2 RETURNING id, nombre")
            .bind(&new.name)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_category", e))?
            .ok_or(StoreError::NotFound)?;
        category_from_row(&row)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_category", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PostgresStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;
        rows.iter().map(product_from_row).collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, StoreError> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?
            .ok_or(StoreError::NotFound)?;
        product_from_row(&row)
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product, StoreError> {
        if !self.category_exists(new.category).await? {
            return Err(StoreError::dangling_reference("categoria", new.category));
        }
        let row = sqlx::query(&format!(
            "INSERT INTO products (nombre, descripcion, precio, categoria_id, stock) \
             VALUES ($1, $2, $3, $4, 0) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.category.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;
        product_from_row(&row)
    }

    async fn update_product(&self, id: ProductId, new: NewProduct) -> Result<Product, StoreError> {
        if !self.category_exists(new.category).await? {
            return Err(StoreError::dangling_reference("categoria", new.category));
        }
        let row = sqlx::query(&format!(
            "UPDATE products SET nombre = $1, descripcion = $2, precio = $3, categoria_id = $4 \
             WHERE id = $5 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.category.get())
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?
        .ok_or(StoreError::NotFound)?;
        product_from_row(&row)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_low_stock(&self, threshold: i64) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock <= $1 ORDER BY id"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_low_stock", e))?;
        rows.iter().map(product_from_row).collect()
    }
}

#[async_trait]
impl MovementRepository for PostgresStore {
    async fn list_movements(&self) -> Result<Vec<MovementDetail>, StoreError> {
        let rows = sqlx::query(&format!(
            "{MOVEMENT_DETAIL_SELECT} ORDER BY m.fecha_actualizacion DESC, m.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_movements", e))?;
        rows.iter().map(movement_detail_from_row).collect()
    }

    async fn get_movement(&self, id: MovementId) -> Result<MovementDetail, StoreError> {
        let row = sqlx::query(&format!("{MOVEMENT_DETAIL_SELECT} WHERE m.id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_movement", e))?
            .ok_or(StoreError::NotFound)?;
        movement_detail_from_row(&row)
    }

    #[instrument(skip(self, new), fields(product_id = %new.product, kind = %new.kind, quantity = new.quantity))]
    async fn record_movement(&self, new: NewMovement) -> Result<RecordedMovement, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        // Row lock: no other writer can read-then-write this product's stock
        // until this transaction ends.
        let locked = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(new.product.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("lock_product", e))?;

        let Some(row) = locked else {
            tx.rollback().await.map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(StoreError::dangling_reference("producto", new.product));
        };
        let mut product = product_from_row(&row)?;

        let stock = match ledger::apply(product.stock, new.kind, new.quantity) {
            Ok(stock) => stock,
            Err(e) => {
                tx.rollback().await.map_err(|e| map_sqlx_error("rollback", e))?;
                return Err(e.into());
            }
        };

        sqlx::query("UPDATE products SET stock = $1 WHERE id = $2")
            .bind(stock)
            .bind(product.id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_stock", e))?;
        product.stock = stock;

        let inserted = sqlx::query(
            "INSERT INTO inventory_movements (tipo, producto_id, cantidad) \
             VALUES ($1, $2, $3) RETURNING id, fecha_actualizacion",
        )
        .bind(new.kind.as_str())
        .bind(new.product.get())
        .bind(new.quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_movement", e))?;

        let id = MovementId::new(inserted.try_get("id").map_err(|e| decode_err("movement", e))?);
        let recorded_at: DateTime<Utc> = inserted
            .try_get("fecha_actualizacion")
            .map_err(|e| decode_err("movement", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(RecordedMovement {
            movement: new.into_movement(id, recorded_at),
            product,
        })
    }

    async fn delete_movement(&self, id: MovementId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM inventory_movements WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_movement", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<StaffUser>, StoreError> {
        let row = sqlx::query("SELECT id, username, password_hash, role FROM staff_users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_username", e))?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_user(&self, new: NewStaffUser) -> Result<StaffUser, StoreError> {
        // Id is assigned by the database; the placeholder never leaves this fn.
        let user = new.into_user(UserId::new(0))?;
        let row = sqlx::query(
            "INSERT INTO staff_users (username, password_hash, role) VALUES ($1, $2, $3) \
             RETURNING id, username, password_hash, role",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))?;
        user_from_row(&row)
    }
}
