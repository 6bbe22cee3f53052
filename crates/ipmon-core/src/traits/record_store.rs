// # Record Store Trait
//
// Defines the interface for reading and writing the managed DNS record.
//
// ## Implementations
//
// - Cloudflare: `ipmon-store-cloudflare` crate
//
// ## Responsibilities
//
// Store clients are isolated, stateless, single-shot API callers:
//
// - One HTTP request per method invocation
// - No retry or backoff logic (owned by the scheduler, via the next tick)
// - No caching between requests (every cycle re-reads from scratch)
// - No decision about whether a write is needed (owned by the `Reconciler`)
//
// A 401/403 from the store is a terminal error for the cycle; the credential
// is never re-tried with a different value.

use crate::config::RecordRef;
use crate::ip::IpAddress;
use async_trait::async_trait;

/// Trait for record store implementations
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the record's current content
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddress)`: The record's content field
    /// - `Err(Error::RecordRead)`: Transport failure, non-2xx status, or
    ///   missing content field
    async fn read(&self, record: &RecordRef) -> Result<IpAddress, crate::Error>;

    /// Replace the record with the new address
    ///
    /// This is a full atomic replace of `{type, name, content, ttl}`, not a
    /// patch. Fields outside those four are overwritten to the store's fixed
    /// values on every write.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The store accepted the replace
    /// - `Err(Error::RecordWrite)`: Transport failure or non-2xx status
    async fn write(&self, record: &RecordRef, new_ip: &IpAddress) -> Result<(), crate::Error>;

    /// Store name for logging
    fn store_name(&self) -> &'static str;
}
