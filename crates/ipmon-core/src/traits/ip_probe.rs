// # IP Probe Trait
//
// Defines the interface for determining the caller's current public IP.
//
// ## Implementations
//
// - HTTP echo service: `ipmon-probe-http` crate
//
// ## Responsibilities
//
// A probe makes exactly one outbound call per invocation and reports what it
// saw. It must not retry, cache, or decide anything: retrying is the
// scheduler's concern (the next tick re-probes from scratch), and comparison
// against the record is owned by the `Reconciler`.

use crate::ip::IpAddress;
use async_trait::async_trait;

/// Trait for public-IP probe implementations
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait IpProbe: Send + Sync {
    /// Fetch the current public IP
    ///
    /// One outbound call, no retries. The returned address is the trimmed
    /// response body; the echo service is trusted to return a bare address,
    /// so no further validation is performed.
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddress)`: The current public IP
    /// - `Err(Error)`: Transport failure, non-2xx status, or empty body
    async fn current(&self) -> Result<IpAddress, crate::Error>;

    /// Probe name for logging
    fn probe_name(&self) -> &'static str;
}
