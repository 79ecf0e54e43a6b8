use async_trait::async_trait;

use crate::{
    AuthorizationError, CredentialGroup, Permission, PermissionMap, PermissionReader,
    PermissionReaderInput, PermissionSet, Verdict,
};

/// Grants or denies every access mode unconditionally.
///
/// Used for paths whose policy is fixed, such as always-public documents.
/// Every credential group present in the input credentials receives the
/// same permission; `control` is left undetermined.
#[derive(Clone, Debug)]
pub struct AllStaticReader {
    permission: Permission,
}

impl AllStaticReader {
    /// Creates a reader that answers every request with `allow`.
    pub fn new(allow: bool) -> Self {
        Self {
            permission: Permission::all_access(Verdict::from_bool(allow)),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PermissionReader for AllStaticReader {
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        let mut result = PermissionMap::new();

        for identifier in input.access_map.keys() {
            let mut permission_set = PermissionSet::default();
            for group in CredentialGroup::ALL {
                if input.credentials.get(group).is_some() {
                    *permission_set.get_mut(group) = self.permission;
                }
            }
            result.insert(identifier.clone(), permission_set);
        }

        Ok(result)
    }
}
