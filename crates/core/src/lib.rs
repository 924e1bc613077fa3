//! Core types for AgentLedger
//!
//! This crate defines the pieces every other layer agrees on:
//! - [`Agent`] and [`AgentFields`]: the record model
//! - [`Invocation`]: the explicit per-call host context
//! - [`Substrate`] and [`ScanCursor`]: the key-value contract supplied by the host
//! - [`Error`] and [`StorageError`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result, StorageError};
pub use traits::{KvPair, ScanCursor, Substrate};
pub use types::{Agent, AgentFields, Invocation, TxId, DEFAULT_STATUS};
