//! Convenient imports for AgentLedger.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use agentledger::prelude::*;
//!
//! let ledger = Ledger::ephemeral().unwrap();
//! ledger.seed().unwrap();
//! ```

// Main entry point
pub use crate::ledger::{Ledger, LedgerBuilder, LedgerConfig};

// Error handling
pub use crate::{Error, Result};

// Record store
pub use crate::{AgentStore, Invocation, Substrate};

// Core types
pub use crate::{Agent, AgentFields, DEFAULT_STATUS};
