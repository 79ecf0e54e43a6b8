use postern_storage::ResourceStoreError;
use thiserror::Error;

/// The common error type used by this crate.
///
/// Every variant maps to an HTTP status code via
/// [AuthorizationError::status_code], so transport layers can produce
/// consistent responses without inspecting variants themselves.
#[derive(Error, Debug)]
pub enum AuthorizationError {
    /// The credentials may not perform the requested access.
    #[error("Forbidden: {reason}")]
    Forbidden {
        /// A human-readable description naming the resource when available.
        reason: String,
    },

    /// Reading an ACL document failed for a reason other than absence.
    #[error("Error reading ACL for {path}: {source}")]
    AclRead {
        /// The resource whose ACL was being read.
        path: String,
        /// The underlying storage failure.
        #[source]
        source: ResourceStoreError,
    },

    /// The handler declines this input; the caller should try another.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// A storage failure outside ACL reading.
    #[error(transparent)]
    Store(#[from] ResourceStoreError),
}

impl AuthorizationError {
    /// Creates a [AuthorizationError::Forbidden] with the given reason.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        AuthorizationError::Forbidden {
            reason: reason.into(),
        }
    }

    /// Creates a [AuthorizationError::AclRead] for the given resource path.
    pub fn acl_read(path: impl Into<String>, source: ResourceStoreError) -> Self {
        AuthorizationError::AclRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a [AuthorizationError::NotSupported] with the given reason.
    pub fn not_supported(reason: impl Into<String>) -> Self {
        AuthorizationError::NotSupported(reason.into())
    }

    /// The HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthorizationError::Forbidden { .. } => 403,
            AuthorizationError::AclRead { .. } => 500,
            AuthorizationError::NotSupported(_) => 400,
            AuthorizationError::Store(error) if error.is_not_found() => 404,
            AuthorizationError::Store(_) => 500,
        }
    }
}
