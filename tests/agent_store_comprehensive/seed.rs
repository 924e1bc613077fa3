//! Bootstrap Seeding Tests

use crate::*;
use agentledger::{bootstrap_agents, SEED_IDS};

#[test]
fn test_seed_writes_three_bootstrap_agents() {
    let store = create_store();
    let ctx = Invocation::new();

    store.seed(&ctx).unwrap();

    assert_eq!(stored_ids(&store), SEED_IDS);
}

#[test]
fn test_seeded_records_only_have_id_did_name() {
    let store = create_store();
    let ctx = Invocation::new();
    store.seed(&ctx).unwrap();

    let expected = [
        ("agent1", "agent1@myssi.org", "Number One"),
        ("agent2", "agent2@myssi.org", "Number Two"),
        ("agent3", "agent3@myssi.org", "Number Three"),
    ];
    for (id, did, name) in expected {
        let agent = store.read(&ctx, id).unwrap();
        assert_eq!(agent, Agent::new(id, AgentFields::new(did, name), ""));
    }
}

#[test]
fn test_seed_overwrites_existing_bootstrap_ids() {
    let store = create_store();
    let ctx = Invocation::new();
    store.create(&ctx, "agent2", full_fields("custom")).unwrap();

    store.seed(&ctx).unwrap();

    assert_eq!(store.read(&ctx, "agent2").unwrap(), bootstrap_agents()[1]);
}

#[test]
fn test_seed_is_repeatable() {
    let store = create_store();
    let ctx = Invocation::new();

    store.seed(&ctx).unwrap();
    store.seed(&ctx).unwrap();

    assert_eq!(store.list_all(&ctx).unwrap(), bootstrap_agents());
}

#[test]
fn test_seed_leaves_other_records_alone() {
    let store = create_store();
    let ctx = Invocation::new();
    store.create(&ctx, "zeta", full_fields("z")).unwrap();

    store.seed(&ctx).unwrap();

    assert_eq!(stored_ids(&store), ["agent1", "agent2", "agent3", "zeta"]);
}
