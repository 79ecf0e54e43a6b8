use std::sync::Arc;

use async_trait::async_trait;
use postern_common::{IdentifierMap, IdentifierStrategy, ResourceIdentifier};

use crate::{
    AclMode, AuthorizationError, CredentialGroup, ModeSet, PermissionMap, PermissionReader,
    PermissionReaderInput, PermissionSet, Verdict,
};

/// Derives `create` and `delete` verdicts from parent-container
/// permissions.
///
/// Creating a resource appends to its parent container, deleting one writes
/// to it. For every entry requiring `create` or `delete`, the wrapped
/// reader is additionally asked about the parent, and the child verdicts
/// are computed as:
///
/// - `create` = parent `append` conjoined with the child's own `create`
///   not being an explicit deny;
/// - `delete` = child `write`, parent `write` and the child's own `delete`
///   not being an explicit deny, conjoined.
///
/// The conjunction is three-valued ([Verdict::and]): an explicit deny on
/// the child absorbs even when every parent verdict is undetermined.
/// Entries without `create` or `delete` requirements pass through
/// unchanged.
pub struct ParentContainerReader<Reader> {
    reader: Reader,
    identifier_strategy: Arc<dyn IdentifierStrategy>,
}

impl<Reader> ParentContainerReader<Reader> {
    /// Wraps `reader`, resolving parents with `identifier_strategy`.
    pub fn new(reader: Reader, identifier_strategy: Arc<dyn IdentifierStrategy>) -> Self {
        Self {
            reader,
            identifier_strategy,
        }
    }

    fn interpret(modes: &ModeSet, child: PermissionSet, parent: PermissionSet) -> PermissionSet {
        let mut result = child;

        for group in CredentialGroup::ALL {
            let child_permission = child.get(group);
            let parent_permission = parent.get(group);
            let merged = result.get_mut(group);

            if modes.contains(&AclMode::Create) {
                merged.create = parent_permission
                    .append
                    .and(Verdict::from_bool(!child_permission.create.is_denied()));
            }
            if modes.contains(&AclMode::Delete) {
                merged.delete = child_permission
                    .write
                    .and(parent_permission.write)
                    .and(Verdict::from_bool(!child_permission.delete.is_denied()));
            }
        }

        result
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Reader> PermissionReader for ParentContainerReader<Reader>
where
    Reader: PermissionReader,
{
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        // Ask the wrapped reader about the parents as well; child entries
        // are kept, never removed.
        let mut forwarded = input.access_map.clone();
        let mut parents: IdentifierMap<ResourceIdentifier> = IdentifierMap::new();

        for (identifier, modes) in &input.access_map {
            let create = modes.contains(&AclMode::Create);
            let delete = modes.contains(&AclMode::Delete);
            if !create && !delete {
                continue;
            }
            let Some(parent) = self.identifier_strategy.parent_container(identifier) else {
                continue;
            };

            let entry = forwarded.entry(parent.clone()).or_default();
            if create {
                entry.insert(AclMode::Append);
            }
            if delete {
                entry.insert(AclMode::Write);
            }
            parents.insert(identifier.clone(), parent);
        }

        let inner_input = PermissionReaderInput::new(input.credentials.clone(), forwarded);
        let inner_result = self.reader.handle_safe(&inner_input).await?;

        let mut result = PermissionMap::new();
        for (identifier, modes) in &input.access_map {
            let child = inner_result.get(identifier).copied().unwrap_or_default();
            let interpreted = match parents.get(identifier) {
                Some(parent) => {
                    let parent_set = inner_result.get(parent).copied().unwrap_or_default();
                    Self::interpret(modes, child, parent_set)
                }
                None => child,
            };
            result.insert(identifier.clone(), interpreted);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use postern_common::SingleRootIdentifierStrategy;

    use crate::{AccessMap, CredentialSet, Permission};

    struct FixedReader(PermissionMap);

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl PermissionReader for FixedReader {
        async fn handle(
            &self,
            _input: &PermissionReaderInput,
        ) -> Result<PermissionMap, AuthorizationError> {
            Ok(self.0.clone())
        }
    }

    fn strategy() -> Arc<dyn IdentifierStrategy> {
        Arc::new(SingleRootIdentifierStrategy::new("http://test.com/").unwrap())
    }

    fn public(permission: Permission) -> PermissionSet {
        PermissionSet {
            public: permission,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn it_derives_create_and_delete_from_the_parent() -> Result<()> {
        let child = ResourceIdentifier::new("http://test.com/foo");
        let parent = ResourceIdentifier::new("http://test.com/");

        let mut inner = PermissionMap::new();
        inner.insert(
            child.clone(),
            public(Permission {
                write: Verdict::Granted,
                ..Default::default()
            }),
        );
        inner.insert(
            parent,
            public(Permission {
                write: Verdict::Granted,
                append: Verdict::Granted,
                ..Default::default()
            }),
        );

        let reader = ParentContainerReader::new(FixedReader(inner), strategy());

        let mut access_map = AccessMap::new();
        access_map.insert(
            child.clone(),
            ModeSet::from_iter([AclMode::Create, AclMode::Delete]),
        );
        let input = PermissionReaderInput::new(CredentialSet::public(), access_map);

        let result = reader.handle_safe(&input).await?;
        let verdicts = result.get(&child).unwrap().public;

        assert!(verdicts.write.is_granted());
        assert!(verdicts.create.is_granted());
        assert!(verdicts.delete.is_granted());

        Ok(())
    }

    #[tokio::test]
    async fn it_preserves_an_explicit_deny_on_the_child() -> Result<()> {
        let child = ResourceIdentifier::new("http://test.com/foo");
        let parent = ResourceIdentifier::new("http://test.com/");

        let mut inner = PermissionMap::new();
        inner.insert(
            child.clone(),
            public(Permission {
                create: Verdict::Denied,
                ..Default::default()
            }),
        );
        inner.insert(
            parent,
            public(Permission {
                append: Verdict::Granted,
                ..Default::default()
            }),
        );

        let reader = ParentContainerReader::new(FixedReader(inner), strategy());

        let mut access_map = AccessMap::new();
        access_map.insert(child.clone(), ModeSet::from_iter([AclMode::Create]));
        let input = PermissionReaderInput::new(CredentialSet::public(), access_map);

        let result = reader.handle_safe(&input).await?;

        assert!(result.get(&child).unwrap().public.create.is_denied());

        Ok(())
    }

    #[tokio::test]
    async fn it_lets_a_child_deny_absorb_an_undetermined_parent() -> Result<()> {
        let child = ResourceIdentifier::new("http://test.com/foo");

        // The wrapped reader makes no statement about the parent at all;
        // the explicit child denies must still come through.
        let mut inner = PermissionMap::new();
        inner.insert(
            child.clone(),
            public(Permission {
                create: Verdict::Denied,
                delete: Verdict::Denied,
                ..Default::default()
            }),
        );

        let reader = ParentContainerReader::new(FixedReader(inner), strategy());

        let mut access_map = AccessMap::new();
        access_map.insert(
            child.clone(),
            ModeSet::from_iter([AclMode::Create, AclMode::Delete]),
        );
        let input = PermissionReaderInput::new(CredentialSet::public(), access_map);

        let result = reader.handle_safe(&input).await?;
        let verdicts = result.get(&child).unwrap().public;

        assert!(verdicts.create.is_denied());
        assert!(verdicts.delete.is_denied());

        Ok(())
    }

    #[tokio::test]
    async fn it_leaves_create_undetermined_without_a_parent_statement() -> Result<()> {
        let child = ResourceIdentifier::new("http://test.com/foo");

        let reader = ParentContainerReader::new(FixedReader(PermissionMap::new()), strategy());

        let mut access_map = AccessMap::new();
        access_map.insert(child.clone(), ModeSet::from_iter([AclMode::Create]));
        let input = PermissionReaderInput::new(CredentialSet::public(), access_map);

        let result = reader.handle_safe(&input).await?;

        assert_eq!(
            result.get(&child).unwrap().public.create,
            Verdict::Undetermined
        );

        Ok(())
    }

    #[tokio::test]
    async fn it_passes_entries_without_parent_work_through_unchanged() -> Result<()> {
        let identifier = ResourceIdentifier::new("http://test.com/foo");

        let mut inner = PermissionMap::new();
        inner.insert(
            identifier.clone(),
            public(Permission {
                read: Verdict::Granted,
                ..Default::default()
            }),
        );

        let reader = ParentContainerReader::new(FixedReader(inner.clone()), strategy());

        let mut access_map = AccessMap::new();
        access_map.insert(identifier.clone(), ModeSet::from_iter([AclMode::Read]));
        let input = PermissionReaderInput::new(CredentialSet::public(), access_map);

        let result = reader.handle_safe(&input).await?;

        assert_eq!(result.get(&identifier), inner.get(&identifier));

        Ok(())
    }
}
