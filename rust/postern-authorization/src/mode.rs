use indexmap::IndexSet;
use postern_common::IdentifierMap;

/// An operational access verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessMode {
    /// Reading a representation of a resource.
    Read,
    /// Adding data to a resource without removing any.
    Append,
    /// Replacing or modifying the data of a resource.
    Write,
    /// Bringing a new resource into existence.
    Create,
    /// Removing a resource.
    Delete,
}

impl AccessMode {
    /// All operational access modes, in a fixed order.
    pub const ALL: [AccessMode; 5] = [
        AccessMode::Read,
        AccessMode::Append,
        AccessMode::Write,
        AccessMode::Create,
        AccessMode::Delete,
    ];
}

/// The superset of [AccessMode] understood by WebACL, adding the
/// ACL-specific `control` mode that governs a subject's ACL resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AclMode {
    /// See [AccessMode::Read].
    Read,
    /// See [AccessMode::Append].
    Append,
    /// See [AccessMode::Write].
    Write,
    /// See [AccessMode::Create].
    Create,
    /// See [AccessMode::Delete].
    Delete,
    /// Full access to the ACL resource of the subject.
    Control,
}

impl AclMode {
    /// All ACL modes, in a fixed order.
    pub const ALL: [AclMode; 6] = [
        AclMode::Read,
        AclMode::Append,
        AclMode::Write,
        AclMode::Create,
        AclMode::Delete,
        AclMode::Control,
    ];
}

impl From<AccessMode> for AclMode {
    fn from(mode: AccessMode) -> Self {
        match mode {
            AccessMode::Read => AclMode::Read,
            AccessMode::Append => AclMode::Append,
            AccessMode::Write => AclMode::Write,
            AccessMode::Create => AclMode::Create,
            AccessMode::Delete => AclMode::Delete,
        }
    }
}

impl std::fmt::Display for AclMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AclMode::Read => f.write_str("read"),
            AclMode::Append => f.write_str("append"),
            AclMode::Write => f.write_str("write"),
            AclMode::Create => f.write_str("create"),
            AclMode::Delete => f.write_str("delete"),
            AclMode::Control => f.write_str("control"),
        }
    }
}

/// An insertion-ordered set of required modes.
pub type ModeSet = IndexSet<AclMode>;

/// The modes each resource of an operation requires.
///
/// An entry with an empty mode set still demands a verdict for its
/// identifier.
pub type AccessMap = IdentifierMap<ModeSet>;
