use serde::{Deserialize, Serialize};

/// The source of trust a credential stems from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialGroup {
    /// No identity: everyone holds this credential.
    Public,
    /// An authenticated agent.
    Agent,
}

impl CredentialGroup {
    /// All credential groups, in a fixed order.
    pub const ALL: [CredentialGroup; 2] = [CredentialGroup::Public, CredentialGroup::Agent];
}

impl std::fmt::Display for CredentialGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialGroup::Public => f.write_str("public"),
            CredentialGroup::Agent => f.write_str("agent"),
        }
    }
}

/// The identity data of one credential.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The WebID of the agent, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_id: Option<String>,
    /// The client the agent is acting through, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Credential {
    /// Creates a credential for the given WebID.
    pub fn with_web_id(web_id: impl Into<String>) -> Self {
        Self {
            web_id: Some(web_id.into()),
            client_id: None,
        }
    }
}

/// The credentials of a request, one per applicable [CredentialGroup].
///
/// An absent entry means the request carries nothing for that group, and
/// readers make no statement for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSet {
    /// The public credential; present for every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<Credential>,
    /// The authenticated agent credential, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Credential>,
}

impl CredentialSet {
    /// Credentials of an unauthenticated request.
    pub fn public() -> Self {
        Self {
            public: Some(Credential::default()),
            agent: None,
        }
    }

    /// Credentials of a request authenticated as the given WebID.
    pub fn authenticated(web_id: impl Into<String>) -> Self {
        Self {
            public: Some(Credential::default()),
            agent: Some(Credential::with_web_id(web_id)),
        }
    }

    /// The credential for the given group, if present.
    pub fn get(&self, group: CredentialGroup) -> Option<&Credential> {
        match group {
            CredentialGroup::Public => self.public.as_ref(),
            CredentialGroup::Agent => self.agent.as_ref(),
        }
    }
}
