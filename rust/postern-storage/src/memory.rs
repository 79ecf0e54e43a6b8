use std::{collections::HashMap, sync::Arc};

use async_stream::try_stream;
use async_trait::async_trait;
use postern_common::ResourceIdentifier;
use postern_rdf::Quad;
use tokio::sync::RwLock;

use crate::{
    INTERNAL_QUADS, Representation, RepresentationPreferences, ResourceSet, ResourceStore,
    ResourceStoreError, boxed_quad_stream,
};

/// A trivial implementation of [ResourceStore] and [ResourceSet] - backed by
/// a [HashMap] - where all documents are kept in memory as quad lists and
/// never persisted.
#[derive(Clone, Default)]
pub struct MemoryResourceStore {
    documents: Arc<RwLock<HashMap<String, Vec<Quad>>>>,
}

impl MemoryResourceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a quad document against the given identifier, replacing any
    /// previous content.
    pub async fn put(&self, identifier: &ResourceIdentifier, quads: Vec<Quad>) {
        let mut documents = self.documents.write().await;
        documents.insert(identifier.path().to_string(), quads);
    }

    /// Removes the document stored against the given identifier, if any.
    pub async fn remove(&self, identifier: &ResourceIdentifier) {
        let mut documents = self.documents.write().await;
        documents.remove(identifier.path());
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ResourceStore for MemoryResourceStore {
    async fn get_representation(
        &self,
        identifier: &ResourceIdentifier,
        _preferences: &RepresentationPreferences,
    ) -> Result<Representation, ResourceStoreError> {
        let documents = self.documents.read().await;
        let quads = documents
            .get(identifier.path())
            .cloned()
            .ok_or_else(|| ResourceStoreError::not_found(identifier.path()))?;

        let data = try_stream! {
            for quad in quads {
                yield quad;
            }
        };

        Ok(Representation {
            identifier: identifier.clone(),
            content_type: INTERNAL_QUADS.to_string(),
            data: boxed_quad_stream(data),
        })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ResourceSet for MemoryResourceStore {
    async fn has_resource(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<bool, ResourceStoreError> {
        let documents = self.documents.read().await;
        Ok(documents.contains_key(identifier.path()))
    }
}
