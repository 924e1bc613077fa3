//! JSON decoding for agent records
//!
//! Decoding is lenient in the same way existing producers are:
//! - a missing tag, or a tag whose value is `null`, leaves the field empty
//! - an unknown key is skipped
//! - keys match tags case-insensitively, an exact match taking precedence
//! - a repeated key keeps its last value
//! - a top-level `null` decodes to an empty record
//!
//! Anything else that is not a JSON object of string-valued tags is rejected.

use agentledger_core::Agent;
use serde_json::error::Category;
use serde_json::{Map, Value};
use thiserror::Error;

use super::TAGS;

/// Decode error types
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Invalid JSON syntax
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Well-formed JSON that is not an agent record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEnd,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Eof => DecodeError::UnexpectedEnd,
            Category::Data => DecodeError::InvalidRecord(err.to_string()),
            Category::Syntax | Category::Io => DecodeError::InvalidJson(err.to_string()),
        }
    }
}

/// Decode stored bytes into an agent
pub fn decode_agent(bytes: &[u8]) -> Result<Agent, DecodeError> {
    // parsing into a map keeps the last value of a repeated key
    let object = match serde_json::from_slice::<Value>(bytes)? {
        Value::Null => return Ok(Agent::default()),
        Value::Object(object) => object,
        other => {
            return Err(DecodeError::InvalidRecord(format!(
                "expected an object, found {}",
                kind(&other)
            )))
        }
    };

    let mut agent = Agent::default();
    let fields = [
        &mut agent.id,
        &mut agent.did,
        &mut agent.name,
        &mut agent.address,
        &mut agent.represents,
        &mut agent.agent_type,
        &mut agent.roles,
        &mut agent.iam,
        &mut agent.status,
    ];
    for (tag, field) in TAGS.into_iter().zip(fields) {
        match lookup(&object, tag) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => *field = text.clone(),
            Some(other) => {
                return Err(DecodeError::InvalidRecord(format!(
                    "invalid type for {tag}: expected a string, found {}",
                    kind(other)
                )))
            }
        }
    }
    Ok(agent)
}

fn lookup<'a>(object: &'a Map<String, Value>, tag: &str) -> Option<&'a Value> {
    object.get(tag).or_else(|| {
        object
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(tag))
            .map(|(_, value)| value)
            .last()
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
