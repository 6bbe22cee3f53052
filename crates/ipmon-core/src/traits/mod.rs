//! Core traits for the ipmon system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpProbe`]: Fetch the caller's current public IP
//! - [`RecordStore`]: Read and write the managed DNS record
//! - [`EventSink`]: Publish reconciliation events out of band

pub mod event_sink;
pub mod ip_probe;
pub mod record_store;

pub use event_sink::{EventSink, ReconcileEvent};
pub use ip_probe::IpProbe;
pub use record_store::RecordStore;
