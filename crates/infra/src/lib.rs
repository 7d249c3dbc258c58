//! Infrastructure layer: persistence adapters.

pub mod store;

pub use store::{
    CategoryRepository, InMemoryStore, MovementRepository, PostgresStore, ProductRepository,
    RecordedMovement, Store, StoreError, UserRepository,
};
