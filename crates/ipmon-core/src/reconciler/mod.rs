//! Core reconciler
//!
//! The Reconciler runs one reconciliation cycle: probe the current public
//! IP, read the record, compare, and on mismatch publish an event and
//! replace the record.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Scheduler  │─── tick ───┐
//! └─────────────┘            │
//!                            ▼
//!                   ┌──────────────┐
//!                   │  Reconciler  │
//!                   └──────────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┐
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  IpProbe    │   │ RecordStore  │   │  EventSink  │
//! │ (current)   │   │ (read/write) │   │ (publish)   │
//! └─────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! ## Cycle Flow
//!
//! 1. Probe the public IP; on failure the cycle ends (`ProbeFailed`)
//! 2. Read the record content; on failure the cycle ends (`ReadFailed`)
//! 3. Compare byte-exact; equal ends the cycle (`Unchanged`)
//! 4. Publish `IpChanged` (best-effort, a failed publish is logged only)
//! 5. Replace the record (`Updated` on success, `WriteFailed` on failure)
//!
//! The write never runs unless both addresses were obtained in the same
//! cycle and differ. A failed publish does not prevent the write; a failed
//! write is not compensated by an "undo" of the already-sent notification.
//! That inconsistency window is accepted.

use crate::config::RecordRef;
use crate::ip::IpAddress;
use crate::traits::{EventSink, IpProbe, ReconcileEvent, RecordStore};
use tracing::{error, info, warn};

/// Outcome of one reconciliation cycle
///
/// Produced fresh each cycle; never persisted. Every error is converted into
/// an outcome at the boundary of the operation that produced it; no error
/// escapes a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Probed IP and record content were byte-identical; nothing was done
    Unchanged,

    /// The record was replaced with the new address
    Updated(IpAddress),

    /// The public-IP probe failed; no read, write, or publish happened
    ProbeFailed,

    /// The record read failed; no write or publish happened
    ReadFailed,

    /// The record replace failed after the change event was already
    /// published
    WriteFailed,
}

/// Core reconciler
///
/// Orchestrates one probe → read → compare → (publish + write) cycle per
/// invocation. Holds no mutable state: every cycle re-probes and re-reads
/// from scratch, so repeated cycles with no real-world change are no-ops.
///
/// ## Comparison
///
/// Addresses are compared byte-exact in their textual form. No
/// normalization of case, leading zeros, or IPv6 compression is performed;
/// see [`IpAddress`].
pub struct Reconciler {
    /// Probe for the current public IP
    probe: Box<dyn IpProbe>,

    /// Store holding the managed record
    store: Box<dyn RecordStore>,

    /// Sink for change announcements
    sink: Box<dyn EventSink>,

    /// The one record kept in sync
    record: RecordRef,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(
        probe: Box<dyn IpProbe>,
        store: Box<dyn RecordStore>,
        sink: Box<dyn EventSink>,
        record: RecordRef,
    ) -> Self {
        Self {
            probe,
            store,
            sink,
            record,
        }
    }

    /// The record this reconciler manages
    pub fn record(&self) -> &RecordRef {
        &self.record
    }

    /// Run one reconciliation cycle to completion
    ///
    /// Always returns; errors are logged at the boundary that produced them
    /// and folded into the outcome.
    pub async fn run_cycle(&self) -> ReconcileOutcome {
        let probed = match self.probe.current().await {
            Ok(ip) => ip,
            Err(e) => {
                error!(probe = self.probe.probe_name(), "failed to fetch public IP: {}", e);
                return ReconcileOutcome::ProbeFailed;
            }
        };

        let recorded = match self.store.read(&self.record).await {
            Ok(ip) => ip,
            Err(e) => {
                error!(
                    store = self.store.store_name(),
                    record = %self.record.name,
                    "failed to read record: {}",
                    e
                );
                return ReconcileOutcome::ReadFailed;
            }
        };

        if probed == recorded {
            info!(record = %self.record.name, ip = %probed, "record unchanged");
            return ReconcileOutcome::Unchanged;
        }

        info!(
            record = %self.record.name,
            previous = %recorded,
            new = %probed,
            "public IP changed"
        );

        // Announce before writing; a failed announcement must not block the
        // write, and a failed write is not rolled back by un-announcing.
        let event = ReconcileEvent::IpChanged {
            record_name: self.record.name.clone(),
            previous_ip: recorded,
            new_ip: probed.clone(),
        };
        if let Err(e) = self.sink.publish(&event).await {
            warn!(sink = self.sink.sink_name(), "failed to publish change event: {}", e);
        }

        match self.store.write(&self.record, &probed).await {
            Ok(()) => {
                info!(record = %self.record.name, ip = %probed, "record updated");
                ReconcileOutcome::Updated(probed)
            }
            Err(e) => {
                error!(
                    store = self.store.store_name(),
                    record = %self.record.name,
                    "failed to write record: {}",
                    e
                );
                ReconcileOutcome::WriteFailed
            }
        }
    }
}
