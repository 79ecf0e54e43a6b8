use async_trait::async_trait;
use postern_rdf::{
    Term,
    vocabulary::{acl, foaf},
};

use crate::{AccessChecker, AccessCheckerInput, AuthorizationError};

/// Matches rules that admit a class of agents through `acl:agentClass`.
///
/// `foaf:Agent` admits every credential; `acl:AuthenticatedAgent` admits
/// credentials carrying a WebID.
#[derive(Clone, Debug, Default)]
pub struct AgentClassAccessChecker;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AccessChecker for AgentClassAccessChecker {
    async fn handle(&self, input: &AccessCheckerInput<'_>) -> Result<bool, AuthorizationError> {
        for object in input.acl.objects(input.rule, &Term::named(acl::AGENT_CLASS)) {
            match object.value() {
                foaf::AGENT => return Ok(true),
                acl::AUTHENTICATED_AGENT if input.credential.web_id.is_some() => return Ok(true),
                _ => {}
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use postern_rdf::{Quad, QuadStore};

    use crate::Credential;

    fn acl_with_class(class: &str) -> (QuadStore, Term) {
        let rule = Term::named("http://test.com/.acl#rule");
        let store = QuadStore::from_iter([Quad::new(
            rule.clone(),
            Term::named(acl::AGENT_CLASS),
            Term::named(class),
        )]);
        (store, rule)
    }

    #[tokio::test]
    async fn it_admits_everyone_for_the_public_class() -> Result<()> {
        let (store, rule) = acl_with_class(foaf::AGENT);
        let anonymous = Credential::default();

        let applies = AgentClassAccessChecker
            .handle_safe(&AccessCheckerInput {
                acl: &store,
                rule: &rule,
                credential: &anonymous,
            })
            .await?;

        assert!(applies);

        Ok(())
    }

    #[tokio::test]
    async fn it_requires_a_web_id_for_the_authenticated_class() -> Result<()> {
        let (store, rule) = acl_with_class(acl::AUTHENTICATED_AGENT);

        let anonymous = Credential::default();
        let input = AccessCheckerInput {
            acl: &store,
            rule: &rule,
            credential: &anonymous,
        };
        assert!(!AgentClassAccessChecker.handle_safe(&input).await?);

        let authenticated = Credential::with_web_id("http://test.com/alice/profile/card#me");
        let input = AccessCheckerInput {
            acl: &store,
            rule: &rule,
            credential: &authenticated,
        };
        assert!(AgentClassAccessChecker.handle_safe(&input).await?);

        Ok(())
    }
}
