use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use postern_common::ResourceIdentifier;

use crate::{Representation, RepresentationPreferences, ResourceSet, ResourceStore, ResourceStoreError};

/// A transparent [ResourceStore] wrapper that counts the operations passing
/// through it. Useful to verify fetch budgets in tests.
#[derive(Clone)]
pub struct MeasuredResourceStore<Store> {
    store: Store,
    representation_reads: Arc<AtomicUsize>,
    existence_probes: Arc<AtomicUsize>,
}

impl<Store> MeasuredResourceStore<Store> {
    /// Wraps the given store.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            representation_reads: Arc::new(AtomicUsize::new(0)),
            existence_probes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The number of representation reads performed so far.
    pub fn representation_reads(&self) -> usize {
        self.representation_reads.load(Ordering::SeqCst)
    }

    /// The number of existence probes performed so far.
    pub fn existence_probes(&self) -> usize {
        self.existence_probes.load(Ordering::SeqCst)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Store> ResourceStore for MeasuredResourceStore<Store>
where
    Store: ResourceStore,
{
    async fn get_representation(
        &self,
        identifier: &ResourceIdentifier,
        preferences: &RepresentationPreferences,
    ) -> Result<Representation, ResourceStoreError> {
        self.representation_reads.fetch_add(1, Ordering::SeqCst);
        self.store.get_representation(identifier, preferences).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Store> ResourceSet for MeasuredResourceStore<Store>
where
    Store: ResourceSet,
{
    async fn has_resource(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<bool, ResourceStoreError> {
        self.existence_probes.fetch_add(1, Ordering::SeqCst);
        self.store.has_resource(identifier).await
    }
}
