// # HTTP Address-Echo Probe
//
// This crate provides an HTTP-based public-IP probe for the ipmon system.
//
// ## Architecture
//
// Fetches the caller's public IP from an external echo service (e.g.
// api64.ipify.org, ifconfig.me) whose response body is the bare address,
// optionally with surrounding whitespace.
//
// The probe is a single-shot caller: one GET per invocation, no retries, no
// caching. Retrying is the scheduler's concern via the next tick.
//
// ## Trust
//
// The echo service is trusted to return a bare address; the body is trimmed
// and used as-is, with no parsing or validation. An empty body is the one
// shape rejected here, because an empty "address" would otherwise flow into
// the comparison and look like a change.

use async_trait::async_trait;
use ipmon_core::config::ProbeConfig;
use ipmon_core::traits::IpProbe;
use ipmon_core::{Error, IpAddress, Result};
use std::time::Duration;

/// Default echo services known to return a plain-text address
#[allow(dead_code)]
const KNOWN_ECHO_SERVICES: &[&str] = &[
    "https://api64.ipify.org", // dual-stack, returns plain text IP
    "https://api.ipify.org",   // v4 only
    "https://icanhazip.com",   // no rate limit documented
];

/// Default HTTP timeout for echo requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public-IP probe
pub struct HttpProbe {
    /// Echo service URL
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpProbe {
    /// Create a new HTTP probe
    ///
    /// # Parameters
    ///
    /// - `url`: Echo service URL (e.g. "https://api64.ipify.org")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a probe from configuration
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        match config {
            ProbeConfig::Http { url } => {
                if url.is_empty() {
                    return Err(Error::config("probe URL cannot be empty"));
                }
                Ok(Self::new(url.clone()))
            }
        }
    }
}

/// Turn an echo-service body into an address: trim, reject empty
fn address_from_body(body: &str) -> Result<IpAddress> {
    let ip = IpAddress::new(body);
    if ip.is_empty() {
        return Err(Error::probe("echo service returned an empty body"));
    }
    Ok(ip)
}

#[async_trait]
impl IpProbe for HttpProbe {
    async fn current(&self) -> Result<IpAddress> {
        tracing::debug!(url = %self.url, "fetching public IP");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::probe(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::probe(format!(
                "echo service returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::probe(format!("failed to read response body: {}", e)))?;

        address_from_body(&body)
    }

    fn probe_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_trimmed() {
        let ip = address_from_body("  203.0.113.5\n").unwrap();
        assert_eq!(ip.as_str(), "203.0.113.5");
    }

    #[test]
    fn body_is_not_validated_beyond_trim() {
        // The echo service is trusted; anything non-empty passes through.
        let ip = address_from_body("2001:db8::1").unwrap();
        assert_eq!(ip.as_str(), "2001:db8::1");
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(address_from_body("").is_err());
        assert!(address_from_body("   \n").is_err());
    }

    #[test]
    fn from_config_rejects_empty_url() {
        let config = ProbeConfig::Http { url: String::new() };
        assert!(HttpProbe::from_config(&config).is_err());
    }

    #[test]
    fn from_config_builds_probe() {
        let config = ProbeConfig::Http {
            url: "https://api64.ipify.org".to_string(),
        };
        assert!(HttpProbe::from_config(&config).is_ok());
    }
}
