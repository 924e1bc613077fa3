//! Bootstrap records
//!
//! Three sample agents with only `id`, `did` and `name` populated. Every
//! other field, `status` included, is empty.

use agentledger_core::{Agent, AgentFields};

/// Ids of the bootstrap records, in write order
pub const SEED_IDS: [&str; 3] = ["agent1", "agent2", "agent3"];

const SEED_NAMES: [&str; 3] = ["Number One", "Number Two", "Number Three"];

/// The bootstrap records, in write order
pub fn bootstrap_agents() -> Vec<Agent> {
    SEED_IDS
        .iter()
        .zip(SEED_NAMES)
        .map(|(id, name)| Agent::new(*id, AgentFields::new(format!("{id}@myssi.org"), name), ""))
        .collect()
}
