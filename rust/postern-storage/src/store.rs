use async_trait::async_trait;
use postern_common::{ConditionalSync, ResourceIdentifier};

use crate::{Representation, RepresentationPreferences, ResourceStoreError};

/// Read access to stored resources.
///
/// The authorization core only ever asks for the internal quad
/// representation; see [RepresentationPreferences::quads]. Implementations
/// must report missing resources with [ResourceStoreError::NotFound] and
/// reserve other error values for real storage failures.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ResourceStore: ConditionalSync {
    /// Retrieves a representation of the given resource.
    async fn get_representation(
        &self,
        identifier: &ResourceIdentifier,
        preferences: &RepresentationPreferences,
    ) -> Result<Representation, ResourceStoreError>;
}

/// Existence probes over stored resources.
///
/// Nonexistence is an answer, not an error: implementations return
/// `Ok(false)` for missing resources and reserve errors for storage
/// failures.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ResourceSet: ConditionalSync {
    /// Whether a resource with the given identifier exists.
    async fn has_resource(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<bool, ResourceStoreError>;
}
