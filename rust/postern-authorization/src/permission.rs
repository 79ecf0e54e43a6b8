use postern_common::IdentifierMap;

use crate::{AccessMode, AclMode, CredentialGroup};

/// A tri-state permission verdict.
///
/// `Undetermined` means no source made a statement; it is weaker than both
/// explicit outcomes. `Denied` is an explicit deny and absorbs everything
/// else when verdicts from multiple sources are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// No statement was made.
    #[default]
    Undetermined,
    /// At least one source allows the access.
    Granted,
    /// A source explicitly denies the access.
    Denied,
}

impl Verdict {
    /// `Granted` for `true`, `Denied` for `false`.
    pub fn from_bool(allow: bool) -> Self {
        if allow { Verdict::Granted } else { Verdict::Denied }
    }

    /// Whether the verdict is [Verdict::Granted].
    pub fn is_granted(self) -> bool {
        self == Verdict::Granted
    }

    /// Whether the verdict is [Verdict::Denied].
    pub fn is_denied(self) -> bool {
        self == Verdict::Denied
    }

    /// Combines verdicts from independent sources.
    ///
    /// `Denied` absorbs, any `Granted` otherwise wins, and `Undetermined`
    /// is the identity. Commutative and associative.
    pub fn merge(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Denied, _) | (_, Verdict::Denied) => Verdict::Denied,
            (Verdict::Granted, _) | (_, Verdict::Granted) => Verdict::Granted,
            (Verdict::Undetermined, Verdict::Undetermined) => Verdict::Undetermined,
        }
    }

    /// Three-valued conjunction.
    ///
    /// `Denied` dominates from either operand, any remaining
    /// `Undetermined` wins over `Granted`, and only two grants conjoin to
    /// `Granted`. Commutative, so an explicit deny survives no matter
    /// which side carries it.
    pub fn and(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Denied, _) | (_, Verdict::Denied) => Verdict::Denied,
            (Verdict::Undetermined, _) | (_, Verdict::Undetermined) => Verdict::Undetermined,
            (Verdict::Granted, Verdict::Granted) => Verdict::Granted,
        }
    }
}

/// The verdict per mode for one credential group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Permission {
    /// Verdict for the read mode.
    pub read: Verdict,
    /// Verdict for the append mode.
    pub append: Verdict,
    /// Verdict for the write mode.
    pub write: Verdict,
    /// Verdict for the create mode.
    pub create: Verdict,
    /// Verdict for the delete mode.
    pub delete: Verdict,
    /// Verdict for the control mode.
    pub control: Verdict,
}

impl Permission {
    /// A permission assigning `verdict` to every operational access mode,
    /// leaving `control` undetermined.
    pub fn all_access(verdict: Verdict) -> Self {
        let mut permission = Permission::default();
        for mode in AccessMode::ALL {
            permission.set(mode.into(), verdict);
        }
        permission
    }

    /// The verdict for the given mode.
    pub fn get(&self, mode: AclMode) -> Verdict {
        match mode {
            AclMode::Read => self.read,
            AclMode::Append => self.append,
            AclMode::Write => self.write,
            AclMode::Create => self.create,
            AclMode::Delete => self.delete,
            AclMode::Control => self.control,
        }
    }

    /// Sets the verdict for the given mode.
    pub fn set(&mut self, mode: AclMode, verdict: Verdict) {
        match mode {
            AclMode::Read => self.read = verdict,
            AclMode::Append => self.append = verdict,
            AclMode::Write => self.write = verdict,
            AclMode::Create => self.create = verdict,
            AclMode::Delete => self.delete = verdict,
            AclMode::Control => self.control = verdict,
        }
    }

    /// Combines two permissions mode by mode with [Verdict::merge].
    pub fn merge(self, other: Permission) -> Permission {
        let mut merged = Permission::default();
        for mode in AclMode::ALL {
            merged.set(mode, self.get(mode).merge(other.get(mode)));
        }
        merged
    }
}

/// The permissions granted to each credential group for one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PermissionSet {
    /// The permission of the public group.
    pub public: Permission,
    /// The permission of the authenticated agent group.
    pub agent: Permission,
}

impl PermissionSet {
    /// The permission of the given group.
    pub fn get(&self, group: CredentialGroup) -> Permission {
        match group {
            CredentialGroup::Public => self.public,
            CredentialGroup::Agent => self.agent,
        }
    }

    /// Mutable access to the permission of the given group.
    pub fn get_mut(&mut self, group: CredentialGroup) -> &mut Permission {
        match group {
            CredentialGroup::Public => &mut self.public,
            CredentialGroup::Agent => &mut self.agent,
        }
    }

    /// Combines two sets group by group with [Permission::merge].
    pub fn merge(self, other: PermissionSet) -> PermissionSet {
        PermissionSet {
            public: self.public.merge(other.public),
            agent: self.agent.merge(other.agent),
        }
    }
}

/// The permissions granted per resource, the outcome of a reader pipeline.
///
/// A missing identifier means no reader made a statement about it, which
/// downstream consumers treat as an empty [PermissionSet].
pub type PermissionMap = IdentifierMap<PermissionSet>;
