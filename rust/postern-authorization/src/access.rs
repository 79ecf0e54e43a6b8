use async_trait::async_trait;
use postern_common::ConditionalSync;
use postern_rdf::{QuadStore, Term};

use crate::{AuthorizationError, Credential};

mod agent;
pub use agent::*;

mod agent_class;
pub use agent_class::*;

mod agent_group;
pub use agent_group::*;

mod any;
pub use any::*;

/// One authorization rule judged against one credential.
pub struct AccessCheckerInput<'a> {
    /// The ACL document the rule was found in.
    pub acl: &'a QuadStore,
    /// The subject term of the `acl:Authorization` rule.
    pub rule: &'a Term,
    /// The credential seeking access.
    pub credential: &'a Credential,
}

/// A predicate deciding whether an authorization rule applies to a
/// credential.
///
/// Implementations are pure given their input: the same rule, document and
/// credential always produce the same answer.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AccessChecker: ConditionalSync {
    /// Checks whether this checker supports the given input.
    async fn can_handle(&self, _input: &AccessCheckerInput<'_>) -> Result<(), AuthorizationError> {
        Ok(())
    }

    /// Whether the rule applies to the credential.
    async fn handle(&self, input: &AccessCheckerInput<'_>) -> Result<bool, AuthorizationError>;

    /// [Self::can_handle] followed by [Self::handle].
    async fn handle_safe(&self, input: &AccessCheckerInput<'_>) -> Result<bool, AuthorizationError> {
        self.can_handle(input).await?;
        self.handle(input).await
    }
}

/// A heap-allocated [AccessChecker], used to compose checker variants.
pub type BoxedAccessChecker = Box<dyn AccessChecker>;
