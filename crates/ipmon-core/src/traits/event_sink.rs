// # Event Sink Trait
//
// Defines the interface for out-of-band announcement of reconciliation
// events.
//
// ## Implementations
//
// - Discord webhook: `ipmon-notify-discord` crate
//
// ## Two-Stage Pipeline
//
// The `Reconciler` decides that something happened and publishes a
// structured `ReconcileEvent`; the sink announces it (webhook push, etc.).
// This keeps the reconciler free of any webhook knowledge, so it can be
// unit-tested with a recording sink instead of network mocks.
//
// Publishing is best-effort: the reconciler logs a failed publish and
// proceeds with the record write regardless. A sink must never block a cycle
// beyond its own transport timeout.

use crate::ip::IpAddress;
use async_trait::async_trait;

/// A domain event produced by one reconciliation cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    /// The probed public IP differs from the record content; a record
    /// replace is about to be attempted
    IpChanged {
        /// Name of the managed record
        record_name: String,
        /// Address currently held by the record
        previous_ip: IpAddress,
        /// Address about to be written
        new_ip: IpAddress,
    },
}

/// Trait for event sink implementations
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Announce a reconciliation event
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The announcement was delivered
    /// - `Err(Error::Notify)`: Delivery failed; the caller logs and moves on
    async fn publish(&self, event: &ReconcileEvent) -> Result<(), crate::Error>;

    /// Sink name for logging
    fn sink_name(&self) -> &'static str;
}
