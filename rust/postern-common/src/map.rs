use indexmap::{IndexMap, IndexSet};

use crate::ResourceIdentifier;

/// A map keyed by [ResourceIdentifier] that iterates in insertion order.
///
/// Keys hash by the identifier path, so two identifiers with the same path
/// address the same entry. Insertion order is preserved to keep pipeline
/// output deterministic.
pub type IdentifierMap<V> = IndexMap<ResourceIdentifier, V>;

/// An insertion-ordered set of [ResourceIdentifier]s.
pub type IdentifierSet = IndexSet<ResourceIdentifier>;
