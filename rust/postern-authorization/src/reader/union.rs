use async_trait::async_trait;

use crate::{
    AuthorizationError, BoxedPermissionReader, PermissionMap, PermissionReader,
    PermissionReaderInput,
};

/// Merges the verdicts of several readers into one [PermissionMap].
///
/// Per identifier, credential group and mode, an explicit deny from any
/// reader wins, any grant otherwise wins, and silence stays silence. A
/// member that declines the input is skipped; a member failure propagates
/// unchanged.
pub struct UnionPermissionReader {
    readers: Vec<BoxedPermissionReader>,
}

impl UnionPermissionReader {
    /// Combines the given readers.
    pub fn new(readers: Vec<BoxedPermissionReader>) -> Self {
        Self { readers }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PermissionReader for UnionPermissionReader {
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        let mut result = PermissionMap::new();

        for reader in &self.readers {
            match reader.can_handle(input).await {
                Ok(()) => {}
                Err(AuthorizationError::NotSupported(_)) => continue,
                Err(error) => return Err(error),
            }

            for (identifier, permission_set) in reader.handle(input).await? {
                let entry = result.entry(identifier).or_default();
                *entry = entry.merge(permission_set);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use postern_common::ResourceIdentifier;

    use crate::{
        AccessMap, CredentialSet, ModeSet, Permission, PermissionSet, Verdict,
    };

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

    struct FailingReader;

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl PermissionReader for FailingReader {
        async fn handle(
            &self,
            _input: &PermissionReaderInput,
        ) -> Result<PermissionMap, AuthorizationError> {
            Err(AuthorizationError::forbidden("reader failure"))
        }
    }

    fn input_for(identifier: &ResourceIdentifier) -> PermissionReaderInput {
        let mut access_map = AccessMap::new();
        access_map.insert(identifier.clone(), ModeSet::new());
        PermissionReaderInput::new(CredentialSet::public(), access_map)
    }

    fn map_with(identifier: &ResourceIdentifier, public: Permission) -> PermissionMap {
        let mut map = PermissionMap::new();
        map.insert(
            identifier.clone(),
            PermissionSet {
                public,
                ..Default::default()
            },
        );
        map
    }

    #[tokio::test]
    async fn it_lets_an_explicit_deny_absorb_a_grant() -> Result<()> {
        let identifier = ResourceIdentifier::new("http://test.com/foo");

        let granting = map_with(
            &identifier,
            Permission {
                read: Verdict::Granted,
                append: Verdict::Granted,
                ..Default::default()
            },
        );
        let denying = map_with(
            &identifier,
            Permission {
                read: Verdict::Denied,
                ..Default::default()
            },
        );

        let reader = UnionPermissionReader::new(vec![
            Box::new(FixedReader(granting)),
            Box::new(FixedReader(denying)),
        ]);
        let result = reader.handle_safe(&input_for(&identifier)).await?;

        let public = result.get(&identifier).unwrap().public;
        assert!(public.read.is_denied());
        assert!(public.append.is_granted());
        assert_eq!(public.write, Verdict::Undetermined);

        Ok(())
    }

    #[tokio::test]
    async fn it_surfaces_member_failures() {
        let identifier = ResourceIdentifier::new("http://test.com/foo");
        let reader = UnionPermissionReader::new(vec![
            Box::new(FixedReader(PermissionMap::new())),
            Box::new(FailingReader),
        ]);

        let error = reader.handle_safe(&input_for(&identifier)).await.unwrap_err();

        assert!(matches!(error, AuthorizationError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn it_keeps_identifiers_reported_by_a_single_member() -> Result<()> {
        let foo = ResourceIdentifier::new("http://test.com/foo");
        let bar = ResourceIdentifier::new("http://test.com/bar");

        let reader = UnionPermissionReader::new(vec![
            Box::new(FixedReader(map_with(
                &foo,
                Permission {
                    read: Verdict::Granted,
                    ..Default::default()
                },
            ))),
            Box::new(FixedReader(map_with(
                &bar,
                Permission {
                    write: Verdict::Granted,
                    ..Default::default()
                },
            ))),
        ]);

        let result = reader.handle_safe(&input_for(&foo)).await?;

        assert!(result.get(&foo).unwrap().public.read.is_granted());
        assert!(result.get(&bar).unwrap().public.write.is_granted());

        Ok(())
    }
}
