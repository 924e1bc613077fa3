//! Core types for agent records
//!
//! This module defines the fundamental types used throughout the system:
//! - [`Agent`]: the single stored entity
//! - [`AgentFields`]: caller-supplied descriptive attributes
//! - [`TxId`]: identifier of one host invocation
//! - [`Invocation`]: the context threaded through every store operation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to every newly created agent
pub const DEFAULT_STATUS: &str = "active";

/// Descriptive attributes of an agent supplied by the caller
///
/// Groups everything except `id` and `status`, which the store manages
/// (or, for updates, receives separately).
///
/// # Examples
///
/// ```
/// use agentledger_core::AgentFields;
///
/// let fields = AgentFields::new("did:example:7", "Seven").with_roles("reader");
/// assert_eq!(fields.name, "Seven");
/// assert_eq!(fields.roles, "reader");
/// assert!(fields.address.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AgentFields {
    /// Decentralized-identifier-style string
    pub did: String,
    /// Display name
    pub name: String,
    /// Postal or network address
    pub address: String,
    /// Party the agent acts on behalf of
    pub represents: String,
    /// Free-form agent category
    pub agent_type: String,
    /// Free-form role list
    pub roles: String,
    /// Identity and access management reference
    pub iam: String,
}

impl AgentFields {
    /// Create fields with a DID and name; everything else empty
    pub fn new(did: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            did: did.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the represented party
    pub fn with_represents(mut self, represents: impl Into<String>) -> Self {
        self.represents = represents.into();
        self
    }

    /// Set the agent type
    pub fn with_agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = agent_type.into();
        self
    }

    /// Set the roles
    pub fn with_roles(mut self, roles: impl Into<String>) -> Self {
        self.roles = roles.into();
        self
    }

    /// Set the IAM reference
    pub fn with_iam(mut self, iam: impl Into<String>) -> Self {
        self.iam = iam.into();
        self
    }
}

/// An agent record
///
/// Serialized as one JSON object whose keys are the uppercase wire tags
/// `ID`, `DID`, `NAME`, `ADDRESS`, `REPRESENTS`, `TYPE`, `ROLES`, `IAM`,
/// `STATUS`. Field order here is the emitted tag order.
///
/// The serde derive fills missing tags with empty strings. Stored records
/// are read through `agentledger_wire::decode_agent`, which is more lenient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    /// Primary key, immutable once created
    #[serde(rename = "ID")]
    pub id: String,
    /// Decentralized-identifier-style string
    #[serde(rename = "DID")]
    pub did: String,
    /// Display name
    #[serde(rename = "NAME")]
    pub name: String,
    /// Postal or network address
    #[serde(rename = "ADDRESS")]
    pub address: String,
    /// Party the agent acts on behalf of
    #[serde(rename = "REPRESENTS")]
    pub represents: String,
    /// Free-form agent category
    #[serde(rename = "TYPE")]
    pub agent_type: String,
    /// Free-form role list
    #[serde(rename = "ROLES")]
    pub roles: String,
    /// Identity and access management reference
    #[serde(rename = "IAM")]
    pub iam: String,
    /// Lifecycle tag
    #[serde(rename = "STATUS")]
    pub status: String,
}

impl Agent {
    /// Assemble a record from its id, descriptive fields and status
    ///
    /// # Examples
    ///
    /// ```
    /// use agentledger_core::{Agent, AgentFields, DEFAULT_STATUS};
    ///
    /// let agent = Agent::new("a-1", AgentFields::new("did:a", "A"), DEFAULT_STATUS);
    /// assert_eq!(agent.id, "a-1");
    /// assert_eq!(agent.status, "active");
    /// ```
    pub fn new(id: impl Into<String>, fields: AgentFields, status: impl Into<String>) -> Self {
        let AgentFields {
            did,
            name,
            address,
            represents,
            agent_type,
            roles,
            iam,
        } = fields;

        Agent {
            id: id.into(),
            did,
            name,
            address,
            represents,
            agent_type,
            roles,
            iam,
            status: status.into(),
        }
    }

    /// Copy out the descriptive fields
    pub fn fields(&self) -> AgentFields {
        AgentFields {
            did: self.did.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            represents: self.represents.clone(),
            agent_type: self.agent_type.clone(),
            roles: self.roles.clone(),
            iam: self.iam.clone(),
        }
    }
}

/// Identifier of a single host invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(Uuid);

impl TxId {
    /// Create a new random TxId using UUID v4
    pub fn new() -> Self {
        TxId(Uuid::new_v4())
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context of one host invocation
///
/// Passed explicitly into every store operation. It identifies the unit of
/// work the host opened for the call and is attached to every log span the
/// operation emits.
///
/// # Examples
///
/// ```
/// use agentledger_core::{Invocation, TxId};
///
/// let tx_id = TxId::new();
/// let ctx = Invocation::with_tx_id(tx_id);
/// assert_eq!(ctx.tx_id(), tx_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    tx_id: TxId,
    started_at: DateTime<Utc>,
}

impl Invocation {
    /// Start a new invocation with a fresh transaction id
    pub fn new() -> Self {
        Self::with_tx_id(TxId::new())
    }

    /// Start an invocation for a transaction id chosen by the host
    pub fn with_tx_id(tx_id: TxId) -> Self {
        Invocation {
            tx_id,
            started_at: Utc::now(),
        }
    }

    /// Transaction id of this invocation
    pub fn tx_id(&self) -> TxId {
        self.tx_id
    }

    /// When the host started this invocation
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new()
    }
}
