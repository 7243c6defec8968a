use sqlx::error::{DatabaseError, ErrorKind};
use wayfare_core::StoreError;

/// Collapse sqlx errors into the domain taxonomy. Uniqueness violations get
/// their own variant so the ensure-or-create workflow can branch on the
/// expected race; everything else is an opaque backend failure.
pub(crate) fn map_sqlx(error: sqlx::Error) -> StoreError {
    if matches!(error, sqlx::Error::RowNotFound) {
        return StoreError::NotFound;
    }

    match error.as_database_error().map(DatabaseError::kind) {
        Some(ErrorKind::UniqueViolation) => StoreError::Duplicate,
        _ => StoreError::backend(error),
    }
}
