pub mod association;
pub mod offer;
pub mod repository;
pub mod wall;

/// Error kinds crossing the store boundary. Raw driver errors are translated
/// into these at the edge of the store crate and never leak further up.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("offer is already assigned to this wall")]
    DuplicateAssociation,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("transaction failure: {0}")]
    TransactionFailure(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
