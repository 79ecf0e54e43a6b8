use async_trait::async_trait;
use postern_rdf::{Term, vocabulary::acl};

use crate::{AccessChecker, AccessCheckerInput, AuthorizationError};

/// Matches rules that name the credential's WebID through `acl:agent`.
#[derive(Clone, Debug, Default)]
pub struct AgentAccessChecker;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AccessChecker for AgentAccessChecker {
    async fn handle(&self, input: &AccessCheckerInput<'_>) -> Result<bool, AuthorizationError> {
        let Some(web_id) = &input.credential.web_id else {
            return Ok(false);
        };

        Ok(input
            .acl
            .objects(input.rule, &Term::named(acl::AGENT))
            .any(|object| object.value() == web_id.as_str()))
    }
}
