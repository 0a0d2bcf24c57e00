use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache {operation} failed: {reason}")]
    Storage { operation: String, reason: String },

    #[error("no cached change with id '{id}'")]
    RecordNotFound { id: String },

    #[error("corrupted cache row: {0}")]
    Corruption(String),
}

impl CacheError {
    pub fn storage(operation: &str, reason: impl ToString) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::RecordNotFound { id: id.to_string() }
    }
}
