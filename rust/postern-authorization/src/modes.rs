use std::sync::Arc;

use async_trait::async_trait;
use postern_common::ConditionalSync;
use postern_storage::ResourceSet;

use crate::{AccessMap, AclMode, AuthorizationError, ModeSet, Operation};

mod intermediate;
pub use intermediate::*;

/// Derives the modes an operation requires per resource.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ModesExtractor: ConditionalSync {
    /// Checks whether this extractor supports the given operation,
    /// declining with [AuthorizationError::NotSupported] when it does not.
    async fn can_handle(&self, _operation: &Operation) -> Result<(), AuthorizationError> {
        Ok(())
    }

    /// The modes the operation requires per resource.
    async fn handle(&self, operation: &Operation) -> Result<AccessMap, AuthorizationError>;

    /// [Self::can_handle] followed by [Self::handle].
    async fn handle_safe(&self, operation: &Operation) -> Result<AccessMap, AuthorizationError> {
        self.can_handle(operation).await?;
        self.handle(operation).await
    }
}

/// Derives required modes from the HTTP method of an operation.
///
/// `GET` and `HEAD` read, `POST` appends, `PUT` writes - creating when the
/// target does not exist yet - and `DELETE` deletes. Other methods are
/// declined.
pub struct MethodModesExtractor {
    resource_set: Arc<dyn ResourceSet>,
}

impl MethodModesExtractor {
    /// Creates an extractor probing resource existence through
    /// `resource_set`.
    pub fn new(resource_set: Arc<dyn ResourceSet>) -> Self {
        Self { resource_set }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ModesExtractor for MethodModesExtractor {
    async fn can_handle(&self, operation: &Operation) -> Result<(), AuthorizationError> {
        match operation.method.as_str() {
            "GET" | "HEAD" | "POST" | "PUT" | "DELETE" => Ok(()),
            method => Err(AuthorizationError::not_supported(format!(
                "Cannot determine required modes for method {method}"
            ))),
        }
    }

    async fn handle(&self, operation: &Operation) -> Result<AccessMap, AuthorizationError> {
        let mut modes = ModeSet::new();

        match operation.method.as_str() {
            "GET" | "HEAD" => {
                modes.insert(AclMode::Read);
            }
            "POST" => {
                modes.insert(AclMode::Append);
            }
            "PUT" => {
                modes.insert(AclMode::Write);
                if !self.resource_set.has_resource(&operation.target).await? {
                    modes.insert(AclMode::Create);
                }
            }
            "DELETE" => {
                modes.insert(AclMode::Delete);
            }
            method => {
                return Err(AuthorizationError::not_supported(format!(
                    "Cannot determine required modes for method {method}"
                )));
            }
        }

        let mut access_map = AccessMap::new();
        access_map.insert(operation.target.clone(), modes);
        Ok(access_map)
    }
}
