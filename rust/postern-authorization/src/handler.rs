use std::sync::Arc;

use async_trait::async_trait;
use postern_common::{ConditionalSync, ResourceIdentifier};
use tracing::debug;

use crate::{
    AuthorizationError, Authorizer, AuthorizerInput, CredentialSet, ModesExtractor, PermissionMap,
    PermissionReader, PermissionReaderInput,
};

/// The slice of an incoming HTTP request that credential extraction needs.
#[derive(Clone, Debug, Default)]
pub struct Request {
    /// The request headers as name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// The value of the first header with the given name, compared
    /// case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Derives the credentials of a request.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CredentialsExtractor: ConditionalSync {
    /// The credentials carried by the request.
    async fn handle(&self, request: &Request) -> Result<CredentialSet, AuthorizationError>;
}

/// Treats every request as unauthenticated.
#[derive(Clone, Debug, Default)]
pub struct PublicCredentialsExtractor;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CredentialsExtractor for PublicCredentialsExtractor {
    async fn handle(&self, _request: &Request) -> Result<CredentialSet, AuthorizationError> {
        Ok(CredentialSet::public())
    }
}

/// One operation against the server.
#[derive(Clone, Debug)]
pub struct Operation {
    /// The HTTP method.
    pub method: String,
    /// The resource the operation addresses.
    pub target: ResourceIdentifier,
    /// The permissions granted to the operation's credentials, attached
    /// after authorization succeeds.
    pub permission_map: Option<PermissionMap>,
}

impl Operation {
    /// Creates an operation for the given method and target.
    pub fn new(method: impl Into<String>, target: ResourceIdentifier) -> Self {
        Self {
            method: method.into(),
            target,
            permission_map: None,
        }
    }
}

/// The outcome of a handled operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
}

/// Executes an operation after it passed authorization.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait OperationHandler: ConditionalSync {
    /// Performs the operation.
    async fn handle(&self, operation: &Operation) -> Result<Response, AuthorizationError>;
}

/// Guards an [OperationHandler] behind the authorization pipeline.
///
/// Per request: extract credentials, derive the required modes, read the
/// granted permissions, authorize. Only on success is the operation -
/// carrying its [PermissionMap] - handed to the wrapped handler; any
/// earlier failure surfaces unchanged and the handler is never invoked.
pub struct AuthorizingHttpHandler {
    credentials_extractor: Arc<dyn CredentialsExtractor>,
    modes_extractor: Arc<dyn ModesExtractor>,
    permission_reader: Arc<dyn PermissionReader>,
    authorizer: Arc<dyn Authorizer>,
    operation_handler: Arc<dyn OperationHandler>,
}

impl AuthorizingHttpHandler {
    /// Assembles the pipeline.
    pub fn new(
        credentials_extractor: Arc<dyn CredentialsExtractor>,
        modes_extractor: Arc<dyn ModesExtractor>,
        permission_reader: Arc<dyn PermissionReader>,
        authorizer: Arc<dyn Authorizer>,
        operation_handler: Arc<dyn OperationHandler>,
    ) -> Self {
        Self {
            credentials_extractor,
            modes_extractor,
            permission_reader,
            authorizer,
            operation_handler,
        }
    }

    /// Authorizes and performs one operation.
    pub async fn handle(
        &self,
        request: &Request,
        mut operation: Operation,
    ) -> Result<Response, AuthorizationError> {
        let credentials = self.credentials_extractor.handle(request).await?;
        let access_map = self.modes_extractor.handle_safe(&operation).await?;
        debug!(
            resource = %operation.target,
            entries = access_map.len(),
            "Extracted required modes"
        );

        let reader_input = PermissionReaderInput::new(credentials.clone(), access_map.clone());
        let permission_map = self.permission_reader.handle_safe(&reader_input).await?;

        let authorizer_input = AuthorizerInput {
            credentials,
            access_map,
            permission_map,
        };
        self.authorizer.handle_safe(&authorizer_input).await?;
        debug!(resource = %operation.target, "Authorization succeeded");

        operation.permission_map = Some(authorizer_input.permission_map);
        self.operation_handler.handle(&operation).await
    }
}
