// # ipmon-core
//
// Core library for the ipmon reconciliation daemon.
//
// ## Architecture Overview
//
// This library provides the core functionality for keeping a single DNS "A"
// record in sync with the caller's public IP address:
//
// - **IpProbe**: Trait for fetching the current public IP
// - **RecordStore**: Trait for reading and writing the managed DNS record
// - **EventSink**: Trait for publishing reconciliation events (notifications)
// - **Reconciler**: Runs one probe → read → compare → (notify + write) cycle
// - **Scheduler**: Drives the reconciler on a fixed period, one cycle at a time
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations;
//    all network I/O lives behind traits in sibling crates
// 2. **Stateless Cycles**: Every cycle re-probes and re-reads from scratch;
//    nothing carries over between cycles
// 3. **Best-Effort Notification**: Sink failures are logged, never escalated;
//    a failed notification does not block the record write
// 4. **No Overlap**: The scheduler runs exactly one cycle to completion per
//    tick; a slow cycle slips the schedule instead of overlapping

pub mod config;
pub mod error;
pub mod ip;
pub mod reconciler;
pub mod scheduler;
pub mod traits;

// Re-export core types for convenience
pub use config::{MessageTemplate, MonitorConfig, NotifierConfig, ProbeConfig, RecordRef, StoreConfig};
pub use error::{Error, Result};
pub use ip::IpAddress;
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use scheduler::Scheduler;
pub use traits::{EventSink, IpProbe, ReconcileEvent, RecordStore};
