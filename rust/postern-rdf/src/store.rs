use std::collections::HashMap;

use crate::{Quad, Term};

/// An in-memory set of quads, indexed by subject.
///
/// The store supports exactly the lookups rule evaluation performs: all
/// quads of one subject, all subjects carrying a given predicate/object
/// pair, and all objects of a subject/predicate pair. Insertion order is
/// preserved; duplicate quads are ignored.
#[derive(Clone, Debug, Default)]
pub struct QuadStore {
    quads: Vec<Quad>,
    by_subject: HashMap<Term, Vec<usize>>,
}

impl QuadStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quad to the store. Duplicates are ignored.
    pub fn insert(&mut self, quad: Quad) {
        if self.quads.contains(&quad) {
            return;
        }

        self.by_subject
            .entry(quad.subject.clone())
            .or_default()
            .push(self.quads.len());
        self.quads.push(quad);
    }

    /// The number of quads in the store.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Whether the store holds no quads.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// All quads, in insertion order.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// All quads whose subject is `subject`.
    pub fn quads_of<'a>(&'a self, subject: &'a Term) -> impl Iterator<Item = &'a Quad> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(|index| &self.quads[*index])
    }

    /// All distinct subjects that carry a quad with the given predicate and
    /// object, in first-appearance order.
    pub fn subjects_with(&self, predicate: &Term, object: &Term) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = Vec::new();

        for quad in &self.quads {
            if &quad.predicate == predicate
                && &quad.object == object
                && !subjects.contains(&&quad.subject)
            {
                subjects.push(&quad.subject);
            }
        }

        subjects
    }

    /// All objects of quads with the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Term,
        predicate: &'a Term,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.quads_of(subject)
            .filter(move |quad| &quad.predicate == predicate)
            .map(|quad| &quad.object)
    }

    /// Whether the store holds the given quad.
    pub fn contains(&self, subject: &Term, predicate: &Term, object: &Term) -> bool {
        self.quads_of(subject)
            .any(|quad| &quad.predicate == predicate && &quad.object == object)
    }
}

impl FromIterator<Quad> for QuadStore {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        let mut store = QuadStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<Quad> for QuadStore {
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, iter: I) {
        for quad in iter {
            self.insert(quad);
        }
    }
}
