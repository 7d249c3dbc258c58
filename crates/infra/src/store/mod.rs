//! Persistence for the catalog, stock movements and staff accounts.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use repository::{
    CategoryRepository, MovementRepository, ProductRepository, RecordedMovement, Store, UserRepository,
};
