use thiserror::Error;

/// Storage-layer error taxonomy shared by every repository trait.
///
/// `Duplicate` exists as its own variant because the price ensure-or-create
/// workflow must branch on it: a uniqueness violation there is the expected
/// concurrent-creation path, not a failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    Duplicate,

    #[error("record not found")]
    NotFound,

    #[error("storage error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
