//! Identifier types shared across the sync core
//!
//! Entity ids are opaque strings assigned by the backend; the core never
//! parses or fabricates them. The request identity is the opaque caller
//! credential (operator, role, session) forwarded on every backend call.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a stored entity record
///
/// Ids are minted by the backend and treated as plain strings here. The
/// newtype exists so signatures say what they mean and so an id cannot be
/// confused with other string fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a raw id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Opaque caller identity attached to every outbound request
///
/// The surrounding console authenticates the operator; this layer only
/// forwards whatever it was handed. A session id is minted locally when the
/// caller does not supply one, so request logs can be correlated server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestIdentity {
    /// Operator account id, if signed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,

    /// Role id under which the operator acts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,

    /// Session correlation id (generated when absent)
    pub session_id: String,
}

impl RequestIdentity {
    /// Create an anonymous identity with a fresh session id
    pub fn anonymous() -> Self {
        Self {
            operator_id: None,
            role_id: None,
            session_id: ulid::Ulid::new().to_string(),
        }
    }

    /// Set the operator id
    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = Some(operator_id.into());
        self
    }

    /// Set the role id
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }
}

impl Default for RequestIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}
