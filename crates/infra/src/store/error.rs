use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::LedgerError;

/// Storage-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage backend error in {operation}: {message}")]
    Backend { operation: String, message: String },
}

impl StoreError {
    pub fn backend(operation: &str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Field error for a reference to a record that does not exist.
    pub fn dangling_reference(field: &str, id: impl core::fmt::Display) -> Self {
        Self::Domain(DomainError::field(
            field,
            format!("invalid pk \"{id}\" - object does not exist"),
        ))
    }
}

/// Map sqlx errors onto `StoreError`.
///
/// | SQLx error | Postgres code | StoreError |
/// |---|---|---|
/// | Database (unique violation) | `23505` | `Conflict` |
/// | Database (foreign key violation) | `23503` | `Conflict` |
/// | Database (check violation) | `23514` | `Domain(InvariantViolation)` |
/// | RowNotFound | n/a | `NotFound` |
/// | anything else | n/a | `Backend` |
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("23503") => StoreError::Conflict(msg),
                Some("23514") => StoreError::Domain(DomainError::invariant(msg)),
                _ => StoreError::backend(operation, msg),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::PoolClosed => StoreError::backend(operation, "connection pool closed"),
        other => StoreError::backend(operation, other.to_string()),
    }
}
