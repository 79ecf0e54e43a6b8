use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug)]
pub enum ResourceStoreError {
    /// The requested resource does not exist.
    #[error("Resource not found: {path}")]
    NotFound {
        /// The path of the missing resource.
        path: String,
    },

    /// A failure of the underlying storage substrate.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl ResourceStoreError {
    /// Creates a [ResourceStoreError::NotFound] for the given path.
    pub fn not_found(path: impl Into<String>) -> Self {
        ResourceStoreError::NotFound { path: path.into() }
    }

    /// Whether this error reports a missing resource, as opposed to a
    /// storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceStoreError::NotFound { .. })
    }
}
