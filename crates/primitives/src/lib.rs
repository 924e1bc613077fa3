//! Record primitives for AgentLedger
//!
//! - [`AgentStore`]: CRUD and full-scan enumeration of agent records over a
//!   host-supplied [`Substrate`](agentledger_core::Substrate)
//! - [`seed`]: the bootstrap records written at initialization

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent_store;
pub mod seed;

pub use agent_store::AgentStore;
pub use seed::{bootstrap_agents, SEED_IDS};
