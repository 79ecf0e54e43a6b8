/// A single RDF term.
///
/// Only the three term kinds the authorization core encounters are modeled;
/// literals keep their lexical form and drop datatype and language tags,
/// which rule evaluation never inspects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// An IRI.
    NamedNode(String),
    /// A blank node label.
    BlankNode(String),
    /// A literal's lexical value.
    Literal(String),
}

impl Term {
    /// Creates a named node from an IRI.
    pub fn named(iri: impl Into<String>) -> Self {
        Term::NamedNode(iri.into())
    }

    /// Creates a blank node from a label.
    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    /// Creates a literal from a lexical value.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// The lexical value of the term: the IRI, label or literal form.
    pub fn value(&self) -> &str {
        match self {
            Term::NamedNode(iri) => iri,
            Term::BlankNode(label) => label,
            Term::Literal(value) => value,
        }
    }

    /// Whether the term is a named node.
    pub fn is_named(&self) -> bool {
        matches!(self, Term::NamedNode(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::NamedNode(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(value) => write!(f, "{value:?}"),
        }
    }
}

/// A subject, predicate, object triple.
///
/// The name follows the wire representation the core consumes; the graph
/// component carried by a full quad is never consulted during rule
/// evaluation and is not stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quad {
    /// The subject term.
    pub subject: Term,
    /// The predicate term.
    pub predicate: Term,
    /// The object term.
    pub object: Term,
}

impl Quad {
    /// Creates a quad from its three terms.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}
