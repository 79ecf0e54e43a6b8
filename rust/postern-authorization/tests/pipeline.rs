//! End-to-end tests of the authorizing handler pipeline.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use postern_authorization::{
    AccessMap, AclMode, AuthorizationError, AuthorizingHttpHandler, CredentialSet, ModeSet,
    ModesExtractor, Operation, OperationHandler, Permission, PermissionBasedAuthorizer,
    PermissionMap, PermissionReader, PermissionReaderInput, PermissionSet,
    PublicCredentialsExtractor, Request, Response, Verdict,
};
use postern_common::ResourceIdentifier;

/// Requires `read` on the operation target.
struct ReadModesExtractor;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ModesExtractor for ReadModesExtractor {
    async fn handle(&self, operation: &Operation) -> Result<AccessMap, AuthorizationError> {
        let mut access_map = AccessMap::new();
        access_map.insert(operation.target.clone(), ModeSet::from_iter([AclMode::Read]));
        Ok(access_map)
    }
}

/// Answers every identifier with a fixed public permission.
struct FixedPublicReader(Permission);

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PermissionReader for FixedPublicReader {
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        let mut result = PermissionMap::new();
        for identifier in input.access_map.keys() {
            result.insert(
                identifier.clone(),
                PermissionSet {
                    public: self.0,
                    ..Default::default()
                },
            );
        }
        Ok(result)
    }
}

/// Records the operations that reach it.
#[derive(Clone, Default)]
struct RecordingOperationHandler {
    operations: Arc<Mutex<Vec<Operation>>>,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl OperationHandler for RecordingOperationHandler {
    async fn handle(&self, operation: &Operation) -> Result<Response, AuthorizationError> {
        self.operations.lock().unwrap().push(operation.clone());
        Ok(Response { status: 200 })
    }
}

fn handler_with(
    permission: Permission,
    downstream: RecordingOperationHandler,
) -> AuthorizingHttpHandler {
    AuthorizingHttpHandler::new(
        Arc::new(PublicCredentialsExtractor),
        Arc::new(ReadModesExtractor),
        Arc::new(FixedPublicReader(permission)),
        Arc::new(PermissionBasedAuthorizer),
        Arc::new(downstream),
    )
}

#[tokio::test]
async fn it_invokes_the_downstream_handler_on_granted_access() -> Result<()> {
    let downstream = RecordingOperationHandler::default();
    let handler = handler_with(
        Permission {
            read: Verdict::Granted,
            ..Default::default()
        },
        downstream.clone(),
    );

    let target = ResourceIdentifier::new("http://test.com/foo");
    let response = handler
        .handle(&Request::default(), Operation::new("GET", target.clone()))
        .await?;

    assert_eq!(response, Response { status: 200 });

    let operations = downstream.operations.lock().unwrap();
    assert_eq!(operations.len(), 1);

    // The granted permissions are attached for downstream use.
    let permission_map = operations[0].permission_map.as_ref().unwrap();
    assert!(permission_map.get(&target).unwrap().public.read.is_granted());

    Ok(())
}

#[tokio::test]
async fn it_rejects_denied_access_without_invoking_the_downstream_handler() {
    let downstream = RecordingOperationHandler::default();
    let handler = handler_with(Permission::default(), downstream.clone());

    let error = handler
        .handle(
            &Request::default(),
            Operation::new("GET", ResourceIdentifier::new("http://test.com/foo")),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, AuthorizationError::Forbidden { .. }));
    assert_eq!(error.status_code(), 403);
    assert!(downstream.operations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_surfaces_modes_extractor_declines_unchanged() {
    struct DecliningExtractor;

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl ModesExtractor for DecliningExtractor {
        async fn can_handle(&self, operation: &Operation) -> Result<(), AuthorizationError> {
            Err(AuthorizationError::not_supported(format!(
                "Cannot determine required modes for method {}",
                operation.method
            )))
        }

        async fn handle(&self, _operation: &Operation) -> Result<AccessMap, AuthorizationError> {
            unreachable!("handle must not be called after can_handle declines")
        }
    }

    let downstream = RecordingOperationHandler::default();
    let handler = AuthorizingHttpHandler::new(
        Arc::new(PublicCredentialsExtractor),
        Arc::new(DecliningExtractor),
        Arc::new(FixedPublicReader(Permission::default())),
        Arc::new(PermissionBasedAuthorizer),
        Arc::new(downstream.clone()),
    );

    let error = handler
        .handle(
            &Request::default(),
            Operation::new("PATCH", ResourceIdentifier::new("http://test.com/foo")),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, AuthorizationError::NotSupported(_)));
    assert!(downstream.operations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_authorizes_with_an_empty_credential_set() {
    // Without credentials no reader makes a statement, so access is denied.
    struct EmptyCredentialsExtractor;

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl postern_authorization::CredentialsExtractor for EmptyCredentialsExtractor {
        async fn handle(&self, _request: &Request) -> Result<CredentialSet, AuthorizationError> {
            Ok(CredentialSet::default())
        }
    }

    let downstream = RecordingOperationHandler::default();
    let handler = AuthorizingHttpHandler::new(
        Arc::new(EmptyCredentialsExtractor),
        Arc::new(ReadModesExtractor),
        Arc::new(postern_authorization::AllStaticReader::new(true)),
        Arc::new(PermissionBasedAuthorizer),
        Arc::new(downstream.clone()),
    );

    let error = handler
        .handle(
            &Request::default(),
            Operation::new("GET", ResourceIdentifier::new("http://test.com/foo")),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, AuthorizationError::Forbidden { .. }));
    assert!(downstream.operations.lock().unwrap().is_empty());
}
