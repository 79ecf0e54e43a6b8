use std::sync::Arc;

use async_trait::async_trait;
use postern_common::{
    AuxiliaryIdentifierStrategy, IdentifierMap, IdentifierSet, IdentifierStrategy,
    ResourceIdentifier,
};
use postern_rdf::{
    QuadStore, Term,
    vocabulary::{acl, rdf},
};
use postern_storage::{RepresentationPreferences, ResourceStore};
use tracing::debug;

use crate::{
    AccessChecker, AccessCheckerInput, AuthorizationError, CredentialGroup, CredentialSet,
    PermissionMap, PermissionReader, PermissionReaderInput, PermissionSet, Verdict,
};

/// Reads and interprets WebACL documents, the ground truth of the
/// pipeline.
///
/// For every target the governing ACL document is discovered by walking up
/// the container hierarchy from the target's own ACL identifier until a
/// document exists; targets sharing a governing document are evaluated
/// together. Rules bound to the governing resource through `acl:accessTo`
/// apply to the resource itself, rules bound through `acl:default` apply to
/// its descendants. Every rule of type `acl:Authorization` that the
/// configured [AccessChecker] accepts for a credential contributes its
/// `acl:mode` objects; verdicts accumulate monotonically and this reader
/// never produces an explicit deny.
pub struct WebAclReader {
    acl_strategy: Arc<dyn AuxiliaryIdentifierStrategy>,
    acl_store: Arc<dyn ResourceStore>,
    identifier_strategy: Arc<dyn IdentifierStrategy>,
    access_checker: Arc<dyn AccessChecker>,
}

impl WebAclReader {
    /// Creates a reader fetching ACL documents from `acl_store`.
    pub fn new(
        acl_strategy: Arc<dyn AuxiliaryIdentifierStrategy>,
        acl_store: Arc<dyn ResourceStore>,
        identifier_strategy: Arc<dyn IdentifierStrategy>,
        access_checker: Arc<dyn AccessChecker>,
    ) -> Self {
        Self {
            acl_strategy,
            acl_store,
            identifier_strategy,
            access_checker,
        }
    }

    /// Finds the resource whose ACL document governs `target`, walking up
    /// the container hierarchy on missing documents.
    ///
    /// Documents already found and ACL identifiers already known to be
    /// missing are remembered across calls within one read, so no ACL
    /// resource is fetched twice.
    async fn effective_acl(
        &self,
        target: &ResourceIdentifier,
        found: &mut IdentifierMap<Arc<QuadStore>>,
        missing: &mut IdentifierSet,
    ) -> Result<(ResourceIdentifier, Arc<QuadStore>), AuthorizationError> {
        let mut current = target.clone();

        loop {
            if let Some(store) = found.get(&current) {
                return Ok((current, store.clone()));
            }

            let acl_identifier = self.acl_strategy.auxiliary_identifier(&current);
            if !missing.contains(&acl_identifier) {
                match self
                    .acl_store
                    .get_representation(&acl_identifier, &RepresentationPreferences::quads())
                    .await
                {
                    Ok(representation) => {
                        let store = representation.into_quad_store().await.map_err(|source| {
                            AuthorizationError::acl_read(current.path(), source)
                        })?;
                        debug!(acl = %acl_identifier, subject = %current, "Found ACL document");
                        let store = Arc::new(store);
                        found.insert(current.clone(), store.clone());
                        return Ok((current, store));
                    }
                    Err(source) if source.is_not_found() => {
                        missing.insert(acl_identifier);
                    }
                    Err(source) => {
                        return Err(AuthorizationError::acl_read(current.path(), source));
                    }
                }
            }

            if self.identifier_strategy.is_root_container(&current) {
                return Err(AuthorizationError::forbidden(format!(
                    "No ACL document found for root container {current}"
                )));
            }
            current = self
                .identifier_strategy
                .parent_container(&current)
                .ok_or_else(|| {
                    AuthorizationError::forbidden(format!("No ACL document found for {target}"))
                })?;
        }
    }

    /// The quads of all rules binding to `governed` through `predicate`.
    fn filter_rules(store: &QuadStore, governed: &str, predicate: &str) -> QuadStore {
        let predicate = Term::named(predicate);
        let object = Term::named(governed);

        let mut filtered = QuadStore::new();
        for subject in store.subjects_with(&predicate, &object) {
            filtered.extend(store.quads_of(subject).cloned());
        }
        filtered
    }

    /// Evaluates the rules of `acl` against the credentials, one permission
    /// per credential group. Absent credentials yield no statement.
    async fn evaluate(
        &self,
        acl: &QuadStore,
        credentials: &CredentialSet,
    ) -> Result<PermissionSet, AuthorizationError> {
        let rule_type = Term::named(rdf::TYPE);
        let authorization = Term::named(acl::AUTHORIZATION);
        let mode_predicate = Term::named(acl::MODE);
        let rules: Vec<Term> = acl
            .subjects_with(&rule_type, &authorization)
            .into_iter()
            .cloned()
            .collect();

        let mut permission_set = PermissionSet::default();
        for group in CredentialGroup::ALL {
            let Some(credential) = credentials.get(group) else {
                continue;
            };
            let permission = permission_set.get_mut(group);

            for rule in &rules {
                let applies = self
                    .access_checker
                    .handle_safe(&AccessCheckerInput {
                        acl,
                        rule,
                        credential,
                    })
                    .await?;
                if !applies {
                    continue;
                }

                for object in acl.objects(rule, &mode_predicate) {
                    match object.value() {
                        acl::READ => permission.read = Verdict::Granted,
                        acl::WRITE => {
                            permission.append = Verdict::Granted;
                            permission.write = Verdict::Granted;
                        }
                        acl::APPEND => permission.append = Verdict::Granted,
                        acl::CONTROL => permission.control = Verdict::Granted,
                        _ => {}
                    }
                }
            }
        }

        Ok(permission_set)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PermissionReader for WebAclReader {
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        // Group targets by the resource whose ACL document governs them.
        // The deepest unclaimed target is resolved first; everything on its
        // lineage at or below the governing resource shares that document.
        let mut remaining: Vec<ResourceIdentifier> = input.access_map.keys().cloned().collect();
        let mut found: IdentifierMap<Arc<QuadStore>> = IdentifierMap::new();
        let mut missing: IdentifierSet = IdentifierSet::new();
        let mut batches: Vec<(Arc<QuadStore>, ResourceIdentifier, Vec<ResourceIdentifier>)> =
            Vec::new();

        while !remaining.is_empty() {
            let mut deepest = remaining[0].clone();
            for candidate in &remaining {
                if candidate.path().len() > deepest.path().len() {
                    deepest = candidate.clone();
                }
            }

            let (governed, store) = self
                .effective_acl(&deepest, &mut found, &mut missing)
                .await?;

            let mut claimed = Vec::new();
            remaining.retain(|target| {
                let on_lineage = deepest.path().starts_with(target.path())
                    && target.path().len() >= governed.path().len();
                if on_lineage {
                    claimed.push(target.clone());
                }
                !on_lineage
            });

            debug!(
                governed = %governed,
                targets = claimed.len(),
                "Claimed targets for ACL document"
            );
            batches.push((store, governed, claimed));
        }

        // Per document, evaluate the rules once per applicable side and
        // assign the same permissions to every target sharing them.
        let mut result = PermissionMap::new();
        for (store, governed, targets) in batches {
            let (direct, indirect): (Vec<_>, Vec<_>) = targets
                .into_iter()
                .partition(|target| target.path() == governed.path());

            if !direct.is_empty() {
                let rules = Self::filter_rules(&store, governed.path(), acl::ACCESS_TO);
                let permission_set = self.evaluate(&rules, &input.credentials).await?;
                for target in direct {
                    result.insert(target, permission_set);
                }
            }
            if !indirect.is_empty() {
                let rules = Self::filter_rules(&store, governed.path(), acl::DEFAULT);
                let permission_set = self.evaluate(&rules, &input.credentials).await?;
                for target in indirect {
                    result.insert(target, permission_set);
                }
            }
        }

        Ok(result)
    }
}
