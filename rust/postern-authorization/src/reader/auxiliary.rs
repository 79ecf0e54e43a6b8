use std::sync::Arc;

use async_trait::async_trait;
use postern_common::{AuxiliaryStrategy, ResourceIdentifier};

use crate::{
    AccessMap, AuthorizationError, PermissionMap, PermissionReader, PermissionReaderInput,
};

/// Forwards auxiliary resources to the authorization of their subject.
///
/// An auxiliary resource that does not use its own authorization is removed
/// from the access map handed to the wrapped reader, its required modes are
/// merged into its subject's entry, and afterwards the auxiliary identifier
/// reappears in the result carrying the subject's permission set. Inputs
/// without such auxiliary resources pass through untouched.
pub struct AuxiliaryReader<Reader> {
    reader: Reader,
    strategy: Arc<dyn AuxiliaryStrategy>,
}

impl<Reader> AuxiliaryReader<Reader> {
    /// Wraps `reader`, recognizing auxiliary resources with `strategy`.
    pub fn new(reader: Reader, strategy: Arc<dyn AuxiliaryStrategy>) -> Self {
        Self { reader, strategy }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Reader> PermissionReader for AuxiliaryReader<Reader>
where
    Reader: PermissionReader,
{
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        let mut associations: Vec<(ResourceIdentifier, ResourceIdentifier)> = Vec::new();
        for identifier in input.access_map.keys() {
            if self.strategy.is_auxiliary_identifier(identifier)
                && !self.strategy.uses_own_authorization(identifier)
            {
                if let Some(subject) = self.strategy.subject_identifier(identifier) {
                    associations.push((identifier.clone(), subject));
                }
            }
        }

        if associations.is_empty() {
            return self.reader.handle_safe(input).await;
        }

        let mut rewritten = AccessMap::new();
        for (identifier, modes) in &input.access_map {
            let key = match associations.iter().find(|(auxiliary, _)| auxiliary == identifier) {
                Some((_, subject)) => subject.clone(),
                None => identifier.clone(),
            };
            rewritten.entry(key).or_default().extend(modes.iter().copied());
        }

        let inner_input = PermissionReaderInput::new(input.credentials.clone(), rewritten);
        let mut result = self.reader.handle_safe(&inner_input).await?;

        for (auxiliary, subject) in associations {
            let permission_set = result.get(&subject).copied().unwrap_or_default();
            result.insert(auxiliary, permission_set);
        }

        Ok(result)
    }
}
