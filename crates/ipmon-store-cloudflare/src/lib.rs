// # Cloudflare Record Store
//
// This crate provides a Cloudflare-backed record store for the ipmon system.
//
// ## Responsibilities
//
// - One HTTP request per method invocation (engine decides, store executes)
// - NO retry or backoff logic (owned by the scheduler, via the next tick)
// - NO caching between requests (every cycle re-reads from scratch)
// - NO decision about whether a write is needed (owned by the reconciler)
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - Get DNS Record:    GET `/zones/:zone_id/dns_records/:record_id`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`
//
// The write is a full record replace of `{type, name, content, ttl}`, not a
// patch: any out-of-band change to other fields is overwritten to the fixed
// values on every write.
//
// ## Security
//
// The API token NEVER appears in logs. The Debug impl redacts it.

use async_trait::async_trait;
use ipmon_core::config::{RecordRef, StoreConfig};
use ipmon_core::traits::RecordStore;
use ipmon_core::{Error, IpAddress, Result};
use serde_json::Value;
use std::time::Duration;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare-backed record store
///
/// Stateless and single-shot: each read or write is one API call with the
/// bearer credential attached. A 401/403 response is a terminal error for
/// the cycle; the credential is never re-tried with a different value.
pub struct CloudflareStore {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// TTL written on every record replace (1 = automatic)
    ttl: u32,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareStore")
            .field("api_token", &"<REDACTED>")
            .field("ttl", &self.ttl)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareStore {
    /// Create a new Cloudflare store
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `ttl`: TTL written on every replace (1 = automatic)
    pub fn new(api_token: impl Into<String>, ttl: u32) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .unwrap_or_default();

        Ok(Self {
            api_token,
            ttl,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
        })
    }

    /// Create a store from configuration
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match config {
            StoreConfig::Cloudflare { api_token, ttl } => Self::new(api_token.clone(), *ttl),
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn record_url(&self, record: &RecordRef) -> String {
        format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, record.zone_id, record.record_id
        )
    }
}

/// Extract the record content from a Cloudflare GET response body
fn content_from_response(json: &Value) -> Result<IpAddress> {
    let content = json["result"]["content"]
        .as_str()
        .ok_or_else(|| Error::record_read("response has no result.content field"))?;
    Ok(IpAddress::new(content))
}

/// Build the full-replace PUT body for a record
fn replace_body(record: &RecordRef, new_ip: &IpAddress, ttl: u32) -> Value {
    serde_json::json!({
        "type": "A",
        "name": record.name,
        "content": new_ip.as_str(),
        "ttl": ttl,
    })
}

/// Describe a non-2xx status for an error message
fn describe_status(status: reqwest::StatusCode) -> String {
    match status.as_u16() {
        401 | 403 => format!(
            "authentication failed: invalid API token or insufficient permissions (status {})",
            status
        ),
        404 => format!("record not found (status {})", status),
        429 => format!("rate limit exceeded (status {})", status),
        500..=599 => format!("Cloudflare server error (status {})", status),
        _ => format!("unexpected status {}", status),
    }
}

#[async_trait]
impl RecordStore for CloudflareStore {
    async fn read(&self, record: &RecordRef) -> Result<IpAddress> {
        tracing::debug!(record = %record.name, "reading DNS record");

        let response = self
            .client
            .get(self.record_url(record))
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::record_read(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::record_read(describe_status(response.status())));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| Error::record_read(format!("failed to parse response: {}", e)))?;

        content_from_response(&json)
    }

    async fn write(&self, record: &RecordRef, new_ip: &IpAddress) -> Result<()> {
        tracing::debug!(record = %record.name, ip = %new_ip, "replacing DNS record");

        let body = replace_body(record, new_ip, self.ttl);

        let response = self
            .client
            .put(self.record_url(record))
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::record_write(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::record_write(describe_status(response.status())));
        }

        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "cloudflare"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RecordRef {
        RecordRef::new("zone123", "rec456", "home.example.com")
    }

    #[test]
    fn content_extracted_from_nested_result() {
        let json = serde_json::json!({
            "success": true,
            "result": {
                "id": "rec456",
                "type": "A",
                "name": "home.example.com",
                "content": "203.0.113.4",
                "ttl": 1
            }
        });

        let ip = content_from_response(&json).unwrap();
        assert_eq!(ip.as_str(), "203.0.113.4");
    }

    #[test]
    fn missing_content_is_a_read_error() {
        let json = serde_json::json!({ "success": true, "result": {} });
        assert!(matches!(
            content_from_response(&json),
            Err(Error::RecordRead(_))
        ));
    }

    #[test]
    fn replace_body_is_a_full_record() {
        let body = replace_body(&record(), &IpAddress::new("203.0.113.5"), 1);
        assert_eq!(
            body,
            serde_json::json!({
                "type": "A",
                "name": "home.example.com",
                "content": "203.0.113.5",
                "ttl": 1
            })
        );
    }

    #[test]
    fn record_url_targets_the_one_record() {
        let store = CloudflareStore::new("test-token", 1).unwrap();
        assert_eq!(
            store.record_url(&record()),
            "https://api.cloudflare.com/client/v4/zones/zone123/dns_records/rec456"
        );
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(CloudflareStore::new("", 1).is_err());
    }

    #[test]
    fn debug_redacts_the_token() {
        let store = CloudflareStore::new("super-secret-token", 1).unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<REDACTED>"));
    }
}
