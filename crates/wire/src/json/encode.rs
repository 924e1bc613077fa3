//! JSON encoding for agent records

use agentledger_core::Agent;
use thiserror::Error;

/// Encode error types
#[derive(Debug, Error)]
#[error("cannot encode agent: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Encode an agent to its stored byte form
///
/// Tags are emitted in [`TAGS`](super::TAGS) order and every field is
/// written, empty or not.
pub fn encode_agent(agent: &Agent) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(agent)?)
}
