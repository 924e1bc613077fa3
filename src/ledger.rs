//! Main entry point for AgentLedger.
//!
//! This module provides the `Ledger` struct: an in-memory execution host that
//! runs agent record operations inside per-invocation transactions.

use agentledger_core::{Agent, AgentFields, Invocation, Result};
use agentledger_primitives::AgentStore;
use agentledger_storage::{MemoryStore, Transaction};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ledger options.
///
/// Derives serde so a host can embed it in its own configuration file.
///
/// # Example
///
/// ```
/// use agentledger::LedgerConfig;
///
/// let config: LedgerConfig = serde_json::from_str(r#"{"seed_on_open": true}"#).unwrap();
/// assert!(config.seed_on_open);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Write the bootstrap agents when the ledger opens
    pub seed_on_open: bool,
}

/// The AgentLedger host.
///
/// Every call runs as one invocation: a fresh [`Transaction`] over the
/// ledger's [`MemoryStore`] and an [`Invocation`] carrying its id. The
/// transaction commits when the call succeeds and is discarded when it fails.
///
/// Invocations run one at a time, so an existence check and the write that
/// depends on it cannot interleave with another invocation's writes.
///
/// # Example
///
/// ```
/// use agentledger::prelude::*;
///
/// let ledger = Ledger::builder().seed_on_open(true).open().unwrap();
///
/// ledger.create("agent4", AgentFields::new("agent4@myssi.org", "Number Four")).unwrap();
/// let ids: Vec<String> = ledger.list_all().unwrap().into_iter().map(|a| a.id).collect();
/// assert_eq!(ids, ["agent1", "agent2", "agent3", "agent4"]);
/// ```
pub struct Ledger {
    store: Arc<MemoryStore>,
    invocation_lock: Mutex<()>,
    config: LedgerConfig,
    committed: AtomicU64,
    rolled_back: AtomicU64,
}

impl Ledger {
    /// Create an empty in-memory ledger with default options.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Create a builder for ledger configuration.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    /// Options this ledger was opened with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The committed key-value store.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Run `f` as one invocation.
    ///
    /// `f` receives the invocation context and a record store bound to the
    /// invocation's transaction. Its writes become visible together when it
    /// returns `Ok`; an `Err` discards all of them.
    ///
    /// Concurrent calls are serialized. `f` must not call back into the
    /// same ledger.
    ///
    /// # Example
    ///
    /// ```
    /// use agentledger::prelude::*;
    ///
    /// let ledger = Ledger::ephemeral().unwrap();
    /// let result: Result<()> = ledger.invoke(|ctx, agents| {
    ///     agents.create(ctx, "a", AgentFields::new("did:a", "A"))?;
    ///     agents.create(ctx, "a", AgentFields::new("did:a", "A again"))?;
    ///     Ok(())
    /// });
    ///
    /// assert!(result.unwrap_err().is_already_exists());
    /// assert!(ledger.list_all().unwrap().is_empty());
    /// ```
    pub fn invoke<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Invocation, &AgentStore<Transaction<'_>>) -> Result<T>,
    {
        let _serial = self.invocation_lock.lock();
        let agents = AgentStore::new(self.store.begin());
        let ctx = Invocation::with_tx_id(agents.substrate().id());

        match f(&ctx, &agents) {
            Ok(value) => {
                agents.into_inner().commit();
                self.committed.fetch_add(1, Ordering::Relaxed);
                Ok(value)
            }
            Err(err) => {
                let txn = agents.into_inner();
                let pending = txn.pending_writes();
                if pending == 0 {
                    debug!(tx_id = %ctx.tx_id(), code = err.code(), error = %err, "invocation failed");
                } else {
                    warn!(tx_id = %ctx.tx_id(), code = err.code(), error = %err, pending, "invocation failed, rolling back");
                }
                txn.rollback();
                self.rolled_back.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    /// Write the bootstrap agents.
    pub fn seed(&self) -> Result<()> {
        self.invoke(|ctx, agents| agents.seed(ctx))
    }

    /// Create an agent with status `"active"`.
    pub fn create(&self, id: &str, fields: AgentFields) -> Result<Agent> {
        self.invoke(|ctx, agents| agents.create(ctx, id, fields))
    }

    /// Read an agent.
    pub fn read(&self, id: &str) -> Result<Agent> {
        self.invoke(|ctx, agents| agents.read(ctx, id))
    }

    /// Check whether an agent is stored under `id`.
    pub fn exists(&self, id: &str) -> Result<bool> {
        self.invoke(|ctx, agents| agents.exists(ctx, id))
    }

    /// Replace every field of an existing agent.
    pub fn update(&self, id: &str, fields: AgentFields, status: &str) -> Result<Agent> {
        self.invoke(|ctx, agents| agents.update(ctx, id, fields, status))
    }

    /// Remove an agent.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.invoke(|ctx, agents| agents.delete(ctx, id))
    }

    /// Every agent in id order.
    pub fn list_all(&self) -> Result<Vec<Agent>> {
        self.invoke(|ctx, agents| agents.list_all(ctx))
    }

    /// Get ledger metrics.
    pub fn metrics(&self) -> LedgerMetrics {
        let committed = self.committed.load(Ordering::Relaxed);
        let rolled_back = self.rolled_back.load(Ordering::Relaxed);
        LedgerMetrics {
            invocations_committed: committed,
            invocations_rolled_back: rolled_back,
            invocations: committed + rolled_back,
            records: self.store.len(),
            version: self.store.version(),
        }
    }
}

/// Ledger metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerMetrics {
    /// Invocations whose writes were committed
    pub invocations_committed: u64,
    /// Invocations whose writes were discarded
    pub invocations_rolled_back: u64,
    /// Total invocations (committed + rolled back)
    pub invocations: u64,
    /// Records currently stored
    pub records: usize,
    /// Store version after the last applied commit
    pub version: u64,
}

/// Builder for ledger configuration.
///
/// # Example
///
/// ```
/// use agentledger::{Ledger, LedgerConfig};
///
/// let ledger = Ledger::builder()
///     .config(LedgerConfig { seed_on_open: true })
///     .open()
///     .unwrap();
/// assert_eq!(ledger.metrics().records, 3);
/// ```
#[derive(Debug, Default)]
pub struct LedgerBuilder {
    config: LedgerConfig,
}

impl LedgerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every option at once.
    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Write the bootstrap agents when the ledger opens.
    pub fn seed_on_open(mut self, seed: bool) -> Self {
        self.config.seed_on_open = seed;
        self
    }

    /// Open the ledger.
    pub fn open(self) -> Result<Ledger> {
        let ledger = Ledger {
            store: Arc::new(MemoryStore::new()),
            invocation_lock: Mutex::new(()),
            config: self.config,
            committed: AtomicU64::new(0),
            rolled_back: AtomicU64::new(0),
        };

        if ledger.config.seed_on_open {
            ledger.seed()?;
        }

        info!(seeded = ledger.config.seed_on_open, "ledger opened");
        Ok(ledger)
    }
}
