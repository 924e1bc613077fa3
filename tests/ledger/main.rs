//! Ledger Host Test Suite
//!
//! Invocation atomicity, metrics and configuration of the in-memory host.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test ledger
//! ```

use agentledger::prelude::*;
use agentledger::{LedgerMetrics, SEED_IDS};
use std::io;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn open_ledger() -> Ledger {
    init_tracing();
    Ledger::ephemeral().unwrap()
}

fn ids(ledger: &Ledger) -> Vec<String> {
    ledger
        .list_all()
        .unwrap()
        .into_iter()
        .map(|agent| agent.id)
        .collect()
}

// =============================================================================
// Opening
// =============================================================================

#[test]
fn test_ephemeral_ledger_starts_empty() {
    let ledger = open_ledger();

    assert!(ledger.list_all().unwrap().is_empty());
    assert_eq!(ledger.config(), &LedgerConfig::default());
    assert!(ledger.store().is_empty());
}

#[test]
fn test_seed_on_open_writes_bootstrap_agents() {
    init_tracing();
    let ledger = Ledger::builder().seed_on_open(true).open().unwrap();

    assert_eq!(ids(&ledger), SEED_IDS);
    assert!(ledger.config().seed_on_open);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: LedgerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LedgerConfig::default());

    let config: LedgerConfig = serde_json::from_str(r#"{"seed_on_open":true}"#).unwrap();
    let ledger = Ledger::builder().config(config.clone()).open().unwrap();
    assert_eq!(ledger.config(), &config);
    assert_eq!(ledger.metrics().records, 3);
}

#[test]
fn test_config_serializes_round_trip() {
    let config = LedgerConfig { seed_on_open: true };
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<LedgerConfig>(&text).unwrap(), config);
}

// =============================================================================
// Convenience operations
// =============================================================================

#[test]
fn test_crud_through_ledger() {
    let ledger = open_ledger();
    let fields = AgentFields::new("did:host", "Host").with_roles("admin");

    let created = ledger.create("h", fields.clone()).unwrap();
    assert_eq!(created, Agent::new("h", fields.clone(), DEFAULT_STATUS));
    assert!(ledger.exists("h").unwrap());

    let updated = ledger
        .update("h", AgentFields::new("did:host2", "Host Two"), "retired")
        .unwrap();
    assert_eq!(ledger.read("h").unwrap(), updated);
    assert_eq!(updated.roles, "");

    ledger.delete("h").unwrap();
    assert!(!ledger.exists("h").unwrap());
    assert!(ledger.read("h").unwrap_err().is_not_found());
}

#[test]
fn test_failed_op_reports_error() {
    let ledger = open_ledger();
    ledger.seed().unwrap();

    assert!(ledger
        .create("agent1", AgentFields::default())
        .unwrap_err()
        .is_already_exists());
    assert!(ledger.delete("nobody").unwrap_err().is_not_found());
    assert_eq!(
        ledger
            .update("nobody", AgentFields::default(), "x")
            .unwrap_err()
            .code(),
        "NotFound"
    );
}

// =============================================================================
// Invocation atomicity
// =============================================================================

#[test]
fn test_invoke_commits_all_writes_on_success() {
    let ledger = open_ledger();

    let created = ledger
        .invoke(|ctx, agents| {
            agents.create(ctx, "a", AgentFields::new("did:a", "A"))?;
            agents.create(ctx, "b", AgentFields::new("did:b", "B"))?;
            agents.list_all(ctx)
        })
        .unwrap();

    // the invocation sees its own writes before commit
    assert_eq!(created.len(), 2);
    assert_eq!(ids(&ledger), ["a", "b"]);
}

#[test]
fn test_invoke_discards_all_writes_on_error() {
    let ledger = open_ledger();
    ledger.create("keep", AgentFields::new("did:k", "K")).unwrap();

    let result: Result<()> = ledger.invoke(|ctx, agents| {
        agents.create(ctx, "x", AgentFields::new("did:x", "X"))?;
        agents.delete(ctx, "keep")?;
        agents.read(ctx, "missing")?;
        Ok(())
    });

    assert!(result.unwrap_err().is_not_found());
    assert_eq!(ids(&ledger), ["keep"]);
}

#[test]
fn test_invoke_context_carries_transaction_id() {
    let ledger = open_ledger();

    let (ctx_id, tx_id) = ledger
        .invoke(|ctx, agents| Ok((ctx.tx_id(), agents.substrate().id())))
        .unwrap();

    assert_eq!(ctx_id, tx_id);
}

#[test]
fn test_each_invocation_gets_a_fresh_transaction_id() {
    let ledger = open_ledger();

    let first = ledger.invoke(|ctx, _| Ok(ctx.tx_id())).unwrap();
    let second = ledger.invoke(|ctx, _| Ok(ctx.tx_id())).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_uncommitted_writes_are_invisible_to_other_readers() {
    let ledger = open_ledger();

    ledger
        .invoke(|ctx, agents| {
            agents.create(ctx, "pending", AgentFields::default())?;
            assert!(ledger.store().get("pending").unwrap().is_none());
            Ok(())
        })
        .unwrap();

    assert!(ledger.store().get("pending").unwrap().is_some());
}

#[test]
fn test_concurrent_creates_of_one_id_admit_exactly_one() {
    let ledger = open_ledger();
    let names = ["first", "second", "third", "fourth"];
    let barrier = Barrier::new(names.len());

    let results: Vec<(&str, bool)> = thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|&name| {
                let ledger = &ledger;
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let created = ledger.invoke(|ctx, agents| {
                        let agent = agents.create(ctx, "dup", AgentFields::new("did:dup", name))?;
                        // widen the window between the existence check and commit
                        thread::sleep(Duration::from_millis(20));
                        Ok(agent)
                    });
                    (name, created.is_ok())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners: Vec<&str> = results
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(winners.len(), 1, "results: {results:?}");
    assert_eq!(ledger.read("dup").unwrap().name, winners[0]);

    let metrics = ledger.metrics();
    assert_eq!(metrics.invocations_committed, 2);
    assert_eq!(metrics.invocations_rolled_back, 3);
}

#[test]
fn test_concurrent_creates_of_distinct_ids_all_commit() {
    let ledger = open_ledger();

    thread::scope(|scope| {
        for i in 0..8 {
            let ledger = &ledger;
            scope.spawn(move || {
                ledger
                    .create(&format!("agent-{i}"), AgentFields::default())
                    .unwrap();
            });
        }
    });

    assert_eq!(ledger.metrics().records, 8);
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    log.text()
}

#[test]
fn test_failed_read_only_invocation_is_not_a_warning() {
    let ledger = Ledger::ephemeral().unwrap();

    let output = capture(|| {
        assert!(ledger.read("nobody").unwrap_err().is_not_found());
    });

    assert!(output.contains("invocation failed"), "log: {output}");
    assert!(!output.contains("WARN"), "log: {output}");
}

#[test]
fn test_discarding_writes_is_a_warning() {
    let ledger = Ledger::ephemeral().unwrap();

    let output = capture(|| {
        let result: Result<()> = ledger.invoke(|ctx, agents| {
            agents.create(ctx, "a", AgentFields::default())?;
            agents.read(ctx, "nobody")?;
            Ok(())
        });
        assert!(result.is_err());
    });

    assert!(output.contains("WARN"), "log: {output}");
    assert!(output.contains("invocation failed, rolling back"), "log: {output}");
}

// =============================================================================
// Metrics
// =============================================================================

#[test]
fn test_metrics_count_commits_and_rollbacks() {
    let ledger = open_ledger();

    ledger.create("a", AgentFields::default()).unwrap();
    let _ = ledger.create("a", AgentFields::default());
    let _ = ledger.read("nobody");
    ledger.read("a").unwrap();

    let metrics = ledger.metrics();
    assert_eq!(
        metrics,
        LedgerMetrics {
            invocations_committed: 2,
            invocations_rolled_back: 2,
            invocations: 4,
            records: 1,
            version: metrics.version,
        }
    );
}

#[test]
fn test_version_advances_only_on_writing_commits() {
    let ledger = open_ledger();
    let start = ledger.metrics().version;

    ledger.list_all().unwrap();
    assert_eq!(ledger.metrics().version, start);

    ledger.create("a", AgentFields::default()).unwrap();
    let after_create = ledger.metrics().version;
    assert!(after_create > start);

    let _ = ledger.delete("missing");
    assert_eq!(ledger.metrics().version, after_create);
}
