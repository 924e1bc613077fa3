//! # AgentLedger
//!
//! Record store for agent identities over a host-supplied key-value store.
//!
//! An agent is a flat record (id, DID, name, address, represents, type,
//! roles, IAM, status) stored as one key-value entry under its id. The
//! record store supports create, read, whole-record update, delete and a
//! full scan, and owns no storage of its own: every operation runs against
//! the [`Substrate`] it was built with and the [`Invocation`] it is given.
//!
//! ## Quick Start
//!
//! ```
//! use agentledger::prelude::*;
//!
//! let ledger = Ledger::ephemeral()?;
//!
//! ledger.create("agent7", AgentFields::new("did:web:seven", "Seven"))?;
//! let agent = ledger.read("agent7")?;
//! assert_eq!(agent.status, "active");
//!
//! ledger.update("agent7", agent.fields().with_roles("auditor"), "suspended")?;
//! ledger.delete("agent7")?;
//! assert!(ledger.read("agent7").unwrap_err().is_not_found());
//! # Ok::<(), agentledger::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`AgentStore`] - the record store, generic over any [`Substrate`]
//! - [`Ledger`] - an in-memory host that wraps each call in a transaction
//! - [`MemoryStore`] / [`Transaction`] - the host's ordered key-value store
//! - [`wire`] - the uppercase-tag record encoding

#![warn(missing_docs)]

mod ledger;

pub mod prelude;

// Re-export main entry points
pub use ledger::{Ledger, LedgerBuilder, LedgerConfig, LedgerMetrics};

pub use agentledger_core::{
    Agent, AgentFields, Error, Invocation, Result, ScanCursor, StorageError, Substrate, TxId,
    DEFAULT_STATUS,
};
pub use agentledger_primitives::{bootstrap_agents, AgentStore, SEED_IDS};
pub use agentledger_storage::{FaultySubstrate, MemoryStore, Transaction};

/// Record encoding
pub mod wire {
    pub use agentledger_wire::{decode_agent, encode_agent, DecodeError, EncodeError, TAGS};
}
