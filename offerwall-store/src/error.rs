use offerwall_core::StoreError;

/// Translates sqlx failures into the store's typed error kinds. Raw driver
/// errors stop here; nothing above the store crate sees SQL detail.
pub(crate) fn translate(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db) => {
            if db.is_unique_violation() {
                // Both association tables name their pair constraint with the
                // uq_wall_ prefix; any other unique index (e.g. the provider
                // tag on offers) is an ordinary constraint violation.
                match db.constraint() {
                    Some(name) if name.starts_with("uq_wall_") => StoreError::DuplicateAssociation,
                    _ => StoreError::ConstraintViolation(db.message().to_string()),
                }
            } else if db.is_foreign_key_violation() || db.is_check_violation() {
                StoreError::ConstraintViolation(db.message().to_string())
            } else {
                StoreError::TransactionFailure(db.message().to_string())
            }
        }
        other => StoreError::TransactionFailure(other.to_string()),
    }
}
