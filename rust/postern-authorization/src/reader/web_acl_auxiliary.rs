use std::sync::Arc;

use async_trait::async_trait;
use postern_common::{AuxiliaryIdentifierStrategy, ResourceIdentifier};

use crate::{
    AccessMap, AclMode, AuthorizationError, CredentialGroup, PermissionMap, PermissionReader,
    PermissionReaderInput, PermissionSet,
};

/// Derives ACL-resource permissions from `control` on the subject.
///
/// WebACL protects ACL documents through the subject's `control` mode
/// rather than through rules of their own. For every ACL identifier in the
/// input, the wrapped reader is asked about the subject with `control`
/// required instead, and the ACL resource afterwards receives `read`,
/// `append`, `write` and `control` verdicts all equal to the subject's
/// `control` verdict - including an undetermined one, which stays
/// undetermined.
pub struct WebAclAuxiliaryReader<Reader> {
    reader: Reader,
    acl_strategy: Arc<dyn AuxiliaryIdentifierStrategy>,
}

impl<Reader> WebAclAuxiliaryReader<Reader> {
    /// Wraps `reader`, recognizing ACL resources with `acl_strategy`.
    pub fn new(reader: Reader, acl_strategy: Arc<dyn AuxiliaryIdentifierStrategy>) -> Self {
        Self {
            reader,
            acl_strategy,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Reader> PermissionReader for WebAclAuxiliaryReader<Reader>
where
    Reader: PermissionReader,
{
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        let mut associations: Vec<(ResourceIdentifier, ResourceIdentifier)> = Vec::new();
        for identifier in input.access_map.keys() {
            if self.acl_strategy.is_auxiliary_identifier(identifier) {
                if let Some(subject) = self.acl_strategy.subject_identifier(identifier) {
                    associations.push((identifier.clone(), subject));
                }
            }
        }

        if associations.is_empty() {
            return self.reader.handle_safe(input).await;
        }

        let mut rewritten = AccessMap::new();
        for (identifier, modes) in &input.access_map {
            match associations.iter().find(|(acl, _)| acl == identifier) {
                Some((_, subject)) => {
                    // Accessing an ACL resource requires control on its subject.
                    rewritten
                        .entry(subject.clone())
                        .or_default()
                        .insert(AclMode::Control);
                }
                None => {
                    rewritten
                        .entry(identifier.clone())
                        .or_default()
                        .extend(modes.iter().copied());
                }
            }
        }

        let inner_input = PermissionReaderInput::new(input.credentials.clone(), rewritten);
        let mut result = self.reader.handle_safe(&inner_input).await?;

        for (acl_identifier, subject) in associations {
            let permission_set = match result.get(&subject) {
                Some(subject_set) => {
                    let mut derived = PermissionSet::default();
                    for group in CredentialGroup::ALL {
                        let control = subject_set.get(group).control;
                        let permission = derived.get_mut(group);
                        permission.read = control;
                        permission.append = control;
                        permission.write = control;
                        permission.control = control;
                    }
                    derived
                }
                None => PermissionSet::default(),
            };
            result.insert(acl_identifier, permission_set);
        }

        Ok(result)
    }
}
