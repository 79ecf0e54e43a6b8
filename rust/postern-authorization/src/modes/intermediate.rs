use std::sync::Arc;

use async_trait::async_trait;
use postern_common::{IdentifierStrategy, ResourceIdentifier};
use postern_storage::ResourceSet;

use crate::{AccessMap, AclMode, AuthorizationError, ModesExtractor, Operation};

/// Adds `create` requirements for missing intermediate containers.
///
/// Creating `/a/b/c` implicitly creates `/a/` and `/a/b/` when they do not
/// exist yet; whoever performs the operation needs `create` on those too.
/// For every entry of the wrapped extractor that requires `create`, the
/// hierarchy is walked upward and every nonexistent ancestor container is
/// added to the map with `create`. The walk stops at the first existing
/// container; the root is assumed to exist.
pub struct IntermediateModesExtractor<Extractor> {
    extractor: Extractor,
    identifier_strategy: Arc<dyn IdentifierStrategy>,
    resource_set: Arc<dyn ResourceSet>,
}

impl<Extractor> IntermediateModesExtractor<Extractor> {
    /// Wraps `extractor`, probing container existence through
    /// `resource_set`.
    pub fn new(
        extractor: Extractor,
        identifier_strategy: Arc<dyn IdentifierStrategy>,
        resource_set: Arc<dyn ResourceSet>,
    ) -> Self {
        Self {
            extractor,
            identifier_strategy,
            resource_set,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Extractor> ModesExtractor for IntermediateModesExtractor<Extractor>
where
    Extractor: ModesExtractor,
{
    async fn can_handle(&self, operation: &Operation) -> Result<(), AuthorizationError> {
        self.extractor.can_handle(operation).await
    }

    async fn handle(&self, operation: &Operation) -> Result<AccessMap, AuthorizationError> {
        let mut access_map = self.extractor.handle(operation).await?;

        let creating: Vec<ResourceIdentifier> = access_map
            .iter()
            .filter(|(_, modes)| modes.contains(&AclMode::Create))
            .map(|(identifier, _)| identifier.clone())
            .collect();

        for identifier in creating {
            let mut current = identifier;
            while let Some(parent) = self.identifier_strategy.parent_container(&current) {
                if self.resource_set.has_resource(&parent).await? {
                    break;
                }
                access_map
                    .entry(parent.clone())
                    .or_default()
                    .insert(AclMode::Create);
                current = parent;
            }
        }

        Ok(access_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use postern_common::SingleRootIdentifierStrategy;
    use postern_storage::MemoryResourceStore;

    use crate::{MethodModesExtractor, ModeSet};

    fn strategy() -> Arc<dyn IdentifierStrategy> {
        Arc::new(SingleRootIdentifierStrategy::new("http://test.com/").unwrap())
    }

    #[tokio::test]
    async fn it_adds_create_for_missing_ancestor_containers() -> Result<()> {
        let store = Arc::new(MemoryResourceStore::new());
        store
            .put(&ResourceIdentifier::new("http://test.com/"), Vec::new())
            .await;

        let extractor = IntermediateModesExtractor::new(
            MethodModesExtractor::new(store.clone()),
            strategy(),
            store,
        );

        let operation = Operation::new("PUT", ResourceIdentifier::new("http://test.com/a/b/c/"));
        let access_map = extractor.handle_safe(&operation).await?;

        let target_modes = access_map
            .get(&ResourceIdentifier::new("http://test.com/a/b/c/"))
            .unwrap();
        assert!(target_modes.contains(&AclMode::Write));
        assert!(target_modes.contains(&AclMode::Create));

        // Ancestors only require create, never the target's other modes.
        assert_eq!(
            access_map.get(&ResourceIdentifier::new("http://test.com/a/b/")),
            Some(&ModeSet::from_iter([AclMode::Create]))
        );
        assert_eq!(
            access_map.get(&ResourceIdentifier::new("http://test.com/a/")),
            Some(&ModeSet::from_iter([AclMode::Create]))
        );
        assert!(
            access_map
                .get(&ResourceIdentifier::new("http://test.com/"))
                .is_none()
        );

        Ok(())
    }

    #[tokio::test]
    async fn it_adds_nothing_when_the_parent_exists() -> Result<()> {
        let store = Arc::new(MemoryResourceStore::new());
        store
            .put(&ResourceIdentifier::new("http://test.com/"), Vec::new())
            .await;
        store
            .put(&ResourceIdentifier::new("http://test.com/a/"), Vec::new())
            .await;

        let extractor = IntermediateModesExtractor::new(
            MethodModesExtractor::new(store.clone()),
            strategy(),
            store,
        );

        let operation = Operation::new("PUT", ResourceIdentifier::new("http://test.com/a/doc"));
        let access_map = extractor.handle_safe(&operation).await?;

        assert_eq!(access_map.len(), 1);
        assert!(
            access_map
                .get(&ResourceIdentifier::new("http://test.com/a/doc"))
                .is_some()
        );

        Ok(())
    }

    #[tokio::test]
    async fn it_leaves_operations_without_create_untouched() -> Result<()> {
        let store = Arc::new(MemoryResourceStore::new());
        let extractor = IntermediateModesExtractor::new(
            MethodModesExtractor::new(store.clone()),
            strategy(),
            store,
        );

        let operation = Operation::new("GET", ResourceIdentifier::new("http://test.com/a/b/doc"));
        let access_map = extractor.handle_safe(&operation).await?;

        assert_eq!(access_map.len(), 1);

        Ok(())
    }
}
