//! Wire encoding for AgentLedger
//!
//! This crate implements the on-store encoding of agent records. Each record
//! is one JSON object keyed by uppercase tags:
//!
//! | Field | Tag |
//! |-------|-----|
//! | id | `ID` |
//! | did | `DID` |
//! | name | `NAME` |
//! | address | `ADDRESS` |
//! | represents | `REPRESENTS` |
//! | agent_type | `TYPE` |
//! | roles | `ROLES` |
//! | iam | `IAM` |
//! | status | `STATUS` |
//!
//! The tag set is frozen: records already held by a host were written with
//! exactly these keys.
//!
//! ## Examples
//!
//! ```
//! use agentledger_core::{Agent, AgentFields};
//! use agentledger_wire::{decode_agent, encode_agent};
//!
//! let agent = Agent::new("agent1", AgentFields::new("agent1@myssi.org", "Number One"), "");
//! let bytes = encode_agent(&agent).unwrap();
//! assert!(bytes.starts_with(br#"{"ID":"agent1","DID":"agent1@myssi.org""#));
//!
//! assert_eq!(decode_agent(&bytes).unwrap(), agent);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

pub use json::{decode_agent, encode_agent, DecodeError, EncodeError, TAGS};
