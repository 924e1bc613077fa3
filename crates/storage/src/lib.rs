//! Storage layer for AgentLedger
//!
//! This crate is a reference execution host for the record store:
//! - MemoryStore: BTreeMap-based ordered storage with RwLock
//! - Transaction: buffered per-invocation unit of work with commit/rollback
//! - Cursor: snapshot range scans with open-cursor accounting
//! - FaultySubstrate: substrate wrapper that fails selected calls
//!
//! Both `MemoryStore` (auto-commit) and `Transaction` implement
//! [`Substrate`](agentledger_core::Substrate).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod fault;
pub mod memory;
pub mod transaction;

pub use cursor::Cursor;
pub use fault::FaultySubstrate;
pub use memory::MemoryStore;
pub use transaction::Transaction;
