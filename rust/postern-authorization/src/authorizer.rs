use async_trait::async_trait;
use postern_common::ConditionalSync;
use tracing::debug;

use crate::{
    AccessMap, AclMode, AuthorizationError, CredentialGroup, CredentialSet, PermissionMap,
    PermissionSet, Verdict,
};

/// Input to an [Authorizer]: the required modes and the granted
/// permissions.
pub struct AuthorizerInput {
    /// The credentials of the request.
    pub credentials: CredentialSet,
    /// The modes required per resource.
    pub access_map: AccessMap,
    /// The permissions granted per resource.
    pub permission_map: PermissionMap,
}

/// The verdict stage of the pipeline: compares required modes against
/// granted permissions.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Authorizer: ConditionalSync {
    /// Checks whether this authorizer supports the given input.
    async fn can_handle(&self, _input: &AuthorizerInput) -> Result<(), AuthorizationError> {
        Ok(())
    }

    /// Succeeds when every required mode is granted; fails with
    /// [AuthorizationError::Forbidden] otherwise.
    async fn handle(&self, input: &AuthorizerInput) -> Result<(), AuthorizationError>;

    /// [Self::can_handle] followed by [Self::handle].
    async fn handle_safe(&self, input: &AuthorizerInput) -> Result<(), AuthorizationError> {
        self.can_handle(input).await?;
        self.handle(input).await
    }
}

/// Authorizes an operation when, for every resource and required mode, at
/// least one credential group holds a grant and none holds an explicit
/// deny.
#[derive(Clone, Debug, Default)]
pub struct PermissionBasedAuthorizer;

impl PermissionBasedAuthorizer {
    fn grants(permission_set: &PermissionSet, mode: AclMode) -> bool {
        let mut granted = false;
        for group in CredentialGroup::ALL {
            match permission_set.get(group).get(mode) {
                Verdict::Denied => return false,
                Verdict::Granted => granted = true,
                Verdict::Undetermined => {}
            }
        }
        granted
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Authorizer for PermissionBasedAuthorizer {
    async fn handle(&self, input: &AuthorizerInput) -> Result<(), AuthorizationError> {
        for (identifier, modes) in &input.access_map {
            let permission_set = input
                .permission_map
                .get(identifier)
                .copied()
                .unwrap_or_default();

            let mut rejected: Vec<AclMode> = modes
                .iter()
                .copied()
                .filter(|mode| !Self::grants(&permission_set, *mode))
                .collect();

            if !rejected.is_empty() {
                rejected.sort();
                let modes = rejected
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                debug!(resource = %identifier, %modes, "Rejecting access");
                return Err(AuthorizationError::forbidden(format!(
                    "Insufficient permissions for {modes} on {identifier}"
                )));
            }
        }

        Ok(())
    }
}
