//! AgentStore: agent record storage primitive
//!
//! ## Design: STATELESS FACADE
//!
//! AgentStore holds ONLY the substrate handle it was built with. No caches,
//! no maps, no locks. Every record lives in the substrate as one entry keyed
//! by the agent id, encoded with the uppercase-tag wire format.
//!
//! ## Invocation Context
//!
//! Every operation takes the host's [`Invocation`] explicitly. Its
//! transaction id is attached to the operation's log span.
//!
//! ## Existence
//!
//! `create`, `update` and `delete` first probe the id with a point lookup.
//! A key exists when the lookup returns bytes, whether or not those bytes
//! decode.
//!
//! ## Failures
//!
//! Substrate failures surface immediately with the offending id. Nothing is
//! retried and nothing is rolled back here: atomicity across several writes
//! belongs to the host's unit of work.

use agentledger_core::{
    Agent, AgentFields, Error, Invocation, Result, StorageError, Substrate, DEFAULT_STATUS,
};
use agentledger_wire::{decode_agent, encode_agent};
use tracing::{debug, debug_span, info, warn};

use crate::seed::bootstrap_agents;

/// Agent record storage primitive
///
/// # Example
///
/// ```
/// use agentledger_core::{AgentFields, Invocation};
/// use agentledger_primitives::AgentStore;
/// use agentledger_storage::MemoryStore;
///
/// let agents = AgentStore::new(MemoryStore::new());
/// let ctx = Invocation::new();
///
/// agents.create(&ctx, "agent7", AgentFields::new("did:seven", "Seven")).unwrap();
/// let agent = agents.read(&ctx, "agent7").unwrap();
/// assert_eq!(agent.status, "active");
/// ```
#[derive(Debug, Clone)]
pub struct AgentStore<S> {
    substrate: S,
}

impl<S: Substrate> AgentStore<S> {
    /// Create a store over a host-supplied substrate
    pub fn new(substrate: S) -> Self {
        Self { substrate }
    }

    /// The underlying substrate
    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    /// Give the substrate back
    pub fn into_inner(self) -> S {
        self.substrate
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    fn serialize(agent: &Agent) -> Result<Vec<u8>> {
        encode_agent(agent).map_err(|e| Error::Serialization {
            id: agent.id.clone(),
            reason: e.to_string(),
        })
    }

    fn deserialize(key: &str, bytes: &[u8]) -> Result<Agent> {
        decode_agent(bytes).map_err(|e| {
            warn!(key, error = %e, "stored agent does not decode");
            Error::Deserialization {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
    }

    // ========================================================================
    // Substrate access
    // ========================================================================

    fn fetch(&self, id: &str) -> Result<Option<Vec<u8>>> {
        self.substrate.get(id).map_err(|source| {
            warn!(id, error = %source, "substrate read failed");
            Error::read(id, source)
        })
    }

    fn write(&self, agent: &Agent) -> Result<()> {
        let bytes = Self::serialize(agent)?;
        self.substrate
            .put(&agent.id, &bytes)
            .map_err(|source| write_failed(&agent.id, source))
    }

    fn probe(&self, id: &str) -> Result<bool> {
        Ok(self.fetch(id)?.is_some())
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Write the bootstrap records
    ///
    /// Records are written one after another with no existence check, so
    /// seeding overwrites records that share a bootstrap id. The first
    /// failure stops the loop and earlier records stay written.
    ///
    /// # Errors
    ///
    /// * `Serialization` - A record could not be encoded
    /// * `StoreWrite` - The substrate rejected a write
    pub fn seed(&self, ctx: &Invocation) -> Result<()> {
        let _span = debug_span!("agent.seed", tx_id = %ctx.tx_id()).entered();

        let agents = bootstrap_agents();
        for agent in &agents {
            self.write(agent)?;
        }

        info!(count = agents.len(), "seeded bootstrap agents");
        Ok(())
    }

    /// Check whether a record is stored under `id`
    ///
    /// Only presence is checked. Bytes that would not decode still count.
    ///
    /// # Errors
    ///
    /// * `StoreRead` - The lookup failed
    pub fn exists(&self, ctx: &Invocation, id: &str) -> Result<bool> {
        let _span = debug_span!("agent.exists", tx_id = %ctx.tx_id(), id).entered();
        self.probe(id)
    }

    /// Create a new agent with status `"active"`
    ///
    /// # Returns
    ///
    /// The record as stored.
    ///
    /// # Errors
    ///
    /// * `AlreadyExists` - A record is already stored under `id`
    /// * `StoreRead` - The existence probe failed
    /// * `Serialization` / `StoreWrite` - The record could not be written
    pub fn create(&self, ctx: &Invocation, id: &str, fields: AgentFields) -> Result<Agent> {
        let _span = debug_span!("agent.create", tx_id = %ctx.tx_id(), id).entered();

        if self.probe(id)? {
            debug!("rejected: id already in use");
            return Err(Error::duplicate(id));
        }

        let agent = Agent::new(id, fields, DEFAULT_STATUS);
        self.write(&agent)?;

        debug!("agent created");
        Ok(agent)
    }

    /// Read the agent stored under `id`
    ///
    /// The returned record is a fresh copy decoded from the substrate.
    ///
    /// # Errors
    ///
    /// * `NotFound` - Nothing is stored under `id`
    /// * `StoreRead` - The lookup failed
    /// * `Deserialization` - The stored bytes do not decode
    pub fn read(&self, ctx: &Invocation, id: &str) -> Result<Agent> {
        let _span = debug_span!("agent.read", tx_id = %ctx.tx_id(), id).entered();

        match self.fetch(id)? {
            Some(bytes) => Self::deserialize(id, &bytes),
            None => Err(Error::missing(id)),
        }
    }

    /// Replace the agent stored under `id`
    ///
    /// Every field is overwritten, `status` included. Nothing from the prior
    /// record survives.
    ///
    /// # Returns
    ///
    /// The record as stored.
    ///
    /// # Errors
    ///
    /// * `NotFound` - Nothing is stored under `id`
    /// * `StoreRead` - The existence probe failed
    /// * `Serialization` / `StoreWrite` - The record could not be written
    pub fn update(
        &self,
        ctx: &Invocation,
        id: &str,
        fields: AgentFields,
        status: &str,
    ) -> Result<Agent> {
        let _span = debug_span!("agent.update", tx_id = %ctx.tx_id(), id).entered();

        if !self.probe(id)? {
            debug!("rejected: no such agent");
            return Err(Error::missing(id));
        }

        let agent = Agent::new(id, fields, status);
        self.write(&agent)?;

        debug!(status, "agent replaced");
        Ok(agent)
    }

    /// Remove the agent stored under `id`
    ///
    /// # Errors
    ///
    /// * `NotFound` - Nothing is stored under `id`
    /// * `StoreRead` - The existence probe failed
    /// * `StoreWrite` - The substrate rejected the delete
    pub fn delete(&self, ctx: &Invocation, id: &str) -> Result<()> {
        let _span = debug_span!("agent.delete", tx_id = %ctx.tx_id(), id).entered();

        if !self.probe(id)? {
            debug!("rejected: no such agent");
            return Err(Error::missing(id));
        }

        self.substrate
            .delete(id)
            .map_err(|source| write_failed(id, source))?;

        debug!("agent deleted");
        Ok(())
    }

    /// Every stored agent in key order
    ///
    /// Scans the whole namespace. The cursor is dropped before this returns
    /// on every path, errors included.
    ///
    /// # Errors
    ///
    /// * `StoreScan` - The scan could not be opened or advanced
    /// * `Deserialization` - A stored record does not decode; no partial
    ///   result is returned
    pub fn list_all(&self, ctx: &Invocation) -> Result<Vec<Agent>> {
        let _span = debug_span!("agent.list_all", tx_id = %ctx.tx_id()).entered();

        let cursor = self
            .substrate
            .scan_range("", "")
            .map_err(scan_failed)?;

        let mut agents = Vec::new();
        for entry in cursor {
            let (key, bytes) = entry.map_err(scan_failed)?;
            agents.push(Self::deserialize(&key, &bytes)?);
        }

        debug!(count = agents.len(), "listed agents");
        Ok(agents)
    }
}

fn write_failed(id: &str, source: StorageError) -> Error {
    warn!(id, error = %source, "substrate write failed");
    Error::write(id, source)
}

fn scan_failed(source: StorageError) -> Error {
    warn!(error = %source, "substrate scan failed");
    Error::scan("", "", source)
}
