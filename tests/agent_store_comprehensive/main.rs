//! Agent Store Comprehensive Test Suite
//!
//! Exercises the record store contract against the in-memory host, directly
//! (auto-commit) and through fault injection.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test agent_store_comprehensive
//!
//! # Failure paths only
//! cargo test --test agent_store_comprehensive failures::
//! ```

use agentledger::{
    Agent, AgentFields, AgentStore, Error, FaultySubstrate, Invocation, MemoryStore, Substrate,
    DEFAULT_STATUS,
};

pub mod seed;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a debug-level subscriber that writes through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Record store over an empty in-memory host
pub fn create_store() -> AgentStore<MemoryStore> {
    init_tracing();
    AgentStore::new(MemoryStore::new())
}

/// Record store over an empty in-memory host with fault injection
pub fn create_faulty_store() -> AgentStore<FaultySubstrate<MemoryStore>> {
    init_tracing();
    AgentStore::new(FaultySubstrate::new(MemoryStore::new()))
}

/// Fields with every attribute populated
pub fn full_fields(tag: &str) -> AgentFields {
    AgentFields::new(format!("did:example:{tag}"), format!("Agent {tag}"))
        .with_address(format!("{tag} Main Street"))
        .with_represents(format!("org-{tag}"))
        .with_agent_type("service")
        .with_roles("issuer,verifier")
        .with_iam(format!("iam:{tag}"))
}

/// Ids of every stored record in scan order
pub fn stored_ids<S: Substrate>(store: &AgentStore<S>) -> Vec<String> {
    store
        .list_all(&Invocation::new())
        .unwrap()
        .into_iter()
        .map(|agent| agent.id)
        .collect()
}
