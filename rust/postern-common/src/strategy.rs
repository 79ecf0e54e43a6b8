//! Pure identifier strategies.
//!
//! These traits answer structural questions about identifiers without any
//! I/O: where a resource sits in the container hierarchy, and how auxiliary
//! resources relate to the subject resources they describe.

use url::Url;

use crate::{ConditionalSync, ResourceIdentifier, ensure_trailing_slash, trim_trailing_slash};

/// Deterministic knowledge of the container hierarchy.
pub trait IdentifierStrategy: ConditionalSync {
    /// Whether this strategy covers the given identifier at all.
    fn supports_identifier(&self, identifier: &ResourceIdentifier) -> bool;

    /// Whether the identifier is the root container.
    fn is_root_container(&self, identifier: &ResourceIdentifier) -> bool;

    /// The container directly above the given identifier.
    ///
    /// Returns `None` for the root container and for identifiers this
    /// strategy does not support.
    fn parent_container(&self, identifier: &ResourceIdentifier) -> Option<ResourceIdentifier>;
}

/// Derivation and recognition of auxiliary resource identifiers.
pub trait AuxiliaryIdentifierStrategy: ConditionalSync {
    /// The auxiliary identifier associated with the given subject.
    fn auxiliary_identifier(&self, subject: &ResourceIdentifier) -> ResourceIdentifier;

    /// Whether the identifier denotes an auxiliary resource.
    fn is_auxiliary_identifier(&self, identifier: &ResourceIdentifier) -> bool;

    /// The subject resource the auxiliary identifier belongs to.
    ///
    /// Returns `None` when the identifier is not auxiliary.
    fn subject_identifier(&self, identifier: &ResourceIdentifier) -> Option<ResourceIdentifier>;
}

/// An [AuxiliaryIdentifierStrategy] that additionally knows whether an
/// auxiliary resource is authorized on its own or through its subject.
pub trait AuxiliaryStrategy: AuxiliaryIdentifierStrategy {
    /// Whether the auxiliary resource has its own authorization, as opposed
    /// to borrowing the authorization of its subject.
    fn uses_own_authorization(&self, identifier: &ResourceIdentifier) -> bool;
}

/// An [IdentifierStrategy] for a server with a single root container.
///
/// All supported identifiers start with the base URL; parents are computed
/// by dropping the last path segment while keeping the trailing slash.
#[derive(Clone, Debug)]
pub struct SingleRootIdentifierStrategy {
    base_url: String,
}

impl SingleRootIdentifierStrategy {
    /// Creates a strategy rooted at `base_url`, which must be a valid
    /// absolute URL. A trailing slash is added when missing.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url)?;
        Ok(Self {
            base_url: ensure_trailing_slash(parsed.as_str()),
        })
    }

    /// The root container URL, with trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl IdentifierStrategy for SingleRootIdentifierStrategy {
    fn supports_identifier(&self, identifier: &ResourceIdentifier) -> bool {
        identifier.path().starts_with(&self.base_url)
    }

    fn is_root_container(&self, identifier: &ResourceIdentifier) -> bool {
        identifier.path() == self.base_url
    }

    fn parent_container(&self, identifier: &ResourceIdentifier) -> Option<ResourceIdentifier> {
        if self.is_root_container(identifier) || !self.supports_identifier(identifier) {
            return None;
        }

        let trimmed = trim_trailing_slash(identifier.path());
        let cut = trimmed.rfind('/')?;
        let parent = &trimmed[..=cut];

        if parent.len() < self.base_url.len() {
            return None;
        }

        Some(ResourceIdentifier::new(parent))
    }
}

/// An [AuxiliaryStrategy] that links auxiliary resources to their subject by
/// a path suffix, e.g. `.acl`.
#[derive(Clone, Debug)]
pub struct SuffixAuxiliaryStrategy {
    suffix: String,
    own_authorization: bool,
}

impl SuffixAuxiliaryStrategy {
    /// Creates a strategy for auxiliary resources recognized by `suffix`.
    ///
    /// The resulting auxiliary resources borrow their subject's
    /// authorization; see [Self::with_own_authorization].
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            own_authorization: false,
        }
    }

    /// Marks the auxiliary resources of this strategy as having their own
    /// authorization instead of borrowing the subject's.
    pub fn with_own_authorization(mut self) -> Self {
        self.own_authorization = true;
        self
    }

    /// The suffix that identifies auxiliary resources of this strategy.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl AuxiliaryIdentifierStrategy for SuffixAuxiliaryStrategy {
    fn auxiliary_identifier(&self, subject: &ResourceIdentifier) -> ResourceIdentifier {
        ResourceIdentifier::new(format!("{}{}", subject.path(), self.suffix))
    }

    fn is_auxiliary_identifier(&self, identifier: &ResourceIdentifier) -> bool {
        identifier.path().ends_with(&self.suffix)
    }

    fn subject_identifier(&self, identifier: &ResourceIdentifier) -> Option<ResourceIdentifier> {
        identifier
            .path()
            .strip_suffix(&self.suffix)
            .map(ResourceIdentifier::new)
    }
}

impl AuxiliaryStrategy for SuffixAuxiliaryStrategy {
    fn uses_own_authorization(&self, _identifier: &ResourceIdentifier) -> bool {
        self.own_authorization
    }
}
