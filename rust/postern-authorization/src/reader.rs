use async_trait::async_trait;
use postern_common::ConditionalSync;

use crate::{AccessMap, AuthorizationError, CredentialSet, PermissionMap};

mod constant;
pub use constant::*;

mod union;
pub use union::*;

mod path_based;
pub use path_based::*;

mod parent_container;
pub use parent_container::*;

mod auxiliary;
pub use auxiliary::*;

mod web_acl_auxiliary;
pub use web_acl_auxiliary::*;

mod web_acl;
pub use web_acl::*;

/// Input to a [PermissionReader]: who is asking, and which modes are
/// required on which resources.
#[derive(Clone, Debug)]
pub struct PermissionReaderInput {
    /// The credentials of the request.
    pub credentials: CredentialSet,
    /// The modes required per resource.
    pub access_map: AccessMap,
}

impl PermissionReaderInput {
    /// Creates an input from credentials and an access map.
    pub fn new(credentials: CredentialSet, access_map: AccessMap) -> Self {
        Self {
            credentials,
            access_map,
        }
    }
}

/// A source of permission verdicts.
///
/// Readers transform an [AccessMap] into a [PermissionMap]. They never
/// mutate their input; transforms build new maps. A reader may return an
/// incomplete map - identifiers it makes no statement about are treated as
/// carrying an empty permission set downstream.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PermissionReader: ConditionalSync {
    /// Checks whether this reader supports the given input, declining with
    /// [AuthorizationError::NotSupported] when it does not.
    async fn can_handle(&self, _input: &PermissionReaderInput) -> Result<(), AuthorizationError> {
        Ok(())
    }

    /// Computes the granted permissions for the identifiers of the input.
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError>;

    /// [Self::can_handle] followed by [Self::handle].
    async fn handle_safe(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        self.can_handle(input).await?;
        self.handle(input).await
    }
}

/// A heap-allocated [PermissionReader], used where pipelines mix reader
/// types.
pub type BoxedPermissionReader = Box<dyn PermissionReader>;
