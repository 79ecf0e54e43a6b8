use std::sync::Arc;

use async_trait::async_trait;
use postern_common::ResourceIdentifier;
use postern_rdf::{
    Term,
    vocabulary::{acl, vcard},
};
use postern_storage::{RepresentationPreferences, ResourceStore};

use crate::{AccessChecker, AccessCheckerInput, AuthorizationError};

/// Matches rules that admit members of a group through `acl:agentGroup`.
///
/// Group objects name a group inside a group document; the document is
/// fetched through the resource store and the credential's WebID is matched
/// against the group's `vcard:hasMember` statements. A missing group
/// document admits nobody; other store failures propagate.
#[derive(Clone)]
pub struct AgentGroupAccessChecker {
    store: Arc<dyn ResourceStore>,
}

impl AgentGroupAccessChecker {
    /// Creates a checker resolving group documents through `store`.
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AccessChecker for AgentGroupAccessChecker {
    async fn handle(&self, input: &AccessCheckerInput<'_>) -> Result<bool, AuthorizationError> {
        let Some(web_id) = &input.credential.web_id else {
            return Ok(false);
        };
        let member = Term::named(web_id.clone());

        for object in input.acl.objects(input.rule, &Term::named(acl::AGENT_GROUP)) {
            let group_iri = object.value();
            // The group lives inside a document; fetch by the fragmentless URL.
            let document_url = group_iri.split('#').next().unwrap_or(group_iri);
            let document = ResourceIdentifier::new(document_url);

            let representation = match self
                .store
                .get_representation(&document, &RepresentationPreferences::quads())
                .await
            {
                Ok(representation) => representation,
                Err(error) if error.is_not_found() => continue,
                Err(error) => return Err(error.into()),
            };
            let quads = representation.into_quad_store().await?;

            if quads.contains(
                &Term::named(group_iri),
                &Term::named(vcard::HAS_MEMBER),
                &member,
            ) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
