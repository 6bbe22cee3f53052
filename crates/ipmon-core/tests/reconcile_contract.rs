//! Contract tests for the reconciliation cycle
//!
//! These verify the compare-then-act transition table:
//! - equal addresses → `Unchanged`, no write, no publish
//! - differing addresses → exactly one publish, then one write
//! - probe failure → nothing else runs this cycle
//! - read failure → no write, no publish
//! - publish failure → write still attempted, outcome unaffected
//! - repeated cycles with no change → no additional writes

mod common;

use common::*;
use ipmon_core::{ReconcileOutcome, Reconciler};
use ipmon_core::traits::ReconcileEvent;

fn reconciler(probe: ScriptedProbe, store: MockStore, sink: RecordingSink) -> Reconciler {
    Reconciler::new(
        Box::new(probe),
        Box::new(store),
        Box::new(sink),
        test_record(),
    )
}

#[tokio::test]
async fn equal_addresses_are_unchanged() {
    let log = call_log();
    let probe = ScriptedProbe::returning("203.0.113.5");
    let store = MockStore::holding("203.0.113.5", log.clone());
    let sink = RecordingSink::new(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    assert_eq!(outcome, ReconcileOutcome::Unchanged);
    assert!(store.writes().is_empty(), "no write for an unchanged record");
    assert!(sink.events().is_empty(), "no publish for an unchanged record");
}

#[tokio::test]
async fn differing_addresses_publish_then_write() {
    let log = call_log();
    let probe = ScriptedProbe::returning("203.0.113.5");
    let store = MockStore::holding("203.0.113.4", log.clone());
    let sink = RecordingSink::new(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    assert_eq!(
        outcome,
        ReconcileOutcome::Updated("203.0.113.5".into())
    );

    // Exactly one write, carrying the probed address.
    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].as_str(), "203.0.113.5");

    // Exactly one publish, carrying both addresses.
    let events = sink.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        ReconcileEvent::IpChanged {
            record_name,
            previous_ip,
            new_ip,
        } => {
            assert_eq!(record_name, "home.example.com");
            assert_eq!(previous_ip.as_str(), "203.0.113.4");
            assert_eq!(new_ip.as_str(), "203.0.113.5");
        }
    }

    // The announcement strictly precedes the write.
    assert_eq!(*log.lock().unwrap(), vec!["publish", "write"]);
}

#[tokio::test]
async fn probe_failure_stops_the_cycle() {
    let log = call_log();
    let probe = ScriptedProbe::failing();
    let store = MockStore::holding("203.0.113.4", log.clone());
    let sink = RecordingSink::new(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    assert_eq!(outcome, ReconcileOutcome::ProbeFailed);
    assert_eq!(store.read_count(), 0, "no read after a failed probe");
    assert!(store.writes().is_empty());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn read_failure_stops_the_cycle() {
    let log = call_log();
    let probe = ScriptedProbe::returning("203.0.113.5");
    let store = MockStore::unreadable(log.clone());
    let sink = RecordingSink::new(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    assert_eq!(outcome, ReconcileOutcome::ReadFailed);
    assert!(store.writes().is_empty(), "no write without a record read");
    assert!(sink.events().is_empty(), "no publish without a record read");
}

#[tokio::test]
async fn failed_publish_does_not_block_the_write() {
    let log = call_log();
    let probe = ScriptedProbe::returning("203.0.113.5");
    let store = MockStore::holding("203.0.113.4", log.clone());
    let sink = RecordingSink::failing(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    // Write result is independent of the publish result.
    assert_eq!(
        outcome,
        ReconcileOutcome::Updated("203.0.113.5".into())
    );
    assert_eq!(store.writes().len(), 1);
    assert_eq!(*log.lock().unwrap(), vec!["publish", "write"]);
}

#[tokio::test]
async fn failed_write_after_publish_is_reported() {
    // The announcement has already gone out for an address that was never
    // persisted. Accepted inconsistency: there is no undo-notify.
    let log = call_log();
    let probe = ScriptedProbe::returning("203.0.113.5");
    let store = MockStore::holding("203.0.113.4", log.clone()).with_failing_writes();
    let sink = RecordingSink::new(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    assert_eq!(outcome, ReconcileOutcome::WriteFailed);
    assert_eq!(sink.events().len(), 1, "announcement was already sent");
}

#[tokio::test]
async fn repeated_cycles_without_change_are_idempotent() {
    let log = call_log();
    let probe = ScriptedProbe::returning("203.0.113.5");
    let store = MockStore::holding("203.0.113.5", log.clone());
    let sink = RecordingSink::new(log.clone());

    let reconciler = reconciler(probe.clone(), store.clone(), sink.clone());

    assert_eq!(reconciler.run_cycle().await, ReconcileOutcome::Unchanged);
    assert_eq!(reconciler.run_cycle().await, ReconcileOutcome::Unchanged);

    assert_eq!(probe.call_count(), 2, "every cycle re-probes from scratch");
    assert_eq!(store.read_count(), 2, "every cycle re-reads from scratch");
    assert!(store.writes().is_empty());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn comparison_is_strictly_textual() {
    // Same address, different spelling: treated as a change, by design.
    let log = call_log();
    let probe = ScriptedProbe::returning("2001:db8::1");
    let store = MockStore::holding("2001:0db8::1", log.clone());
    let sink = RecordingSink::new(log.clone());

    let outcome = reconciler(probe, store.clone(), sink.clone())
        .run_cycle()
        .await;

    assert_eq!(outcome, ReconcileOutcome::Updated("2001:db8::1".into()));
    assert_eq!(store.writes().len(), 1);
}
