//! Configuration types for the ipmon system
//!
//! All configuration is resolved once at startup (the daemon reads it from
//! environment variables) and is read-only for the process lifetime.

use crate::ip::IpAddress;
use serde::{Deserialize, Serialize};

/// Main monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Probe configuration (where the public IP comes from)
    pub probe: ProbeConfig,

    /// Record store configuration
    pub store: StoreConfig,

    /// The one DNS record kept in sync
    pub record: RecordRef,

    /// Notifier configuration
    pub notifier: NotifierConfig,

    /// Polling period between reconciliation cycles, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl MonitorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.poll_interval_secs == 0 {
            return Err(crate::Error::config("poll interval must be > 0"));
        }

        self.probe.validate()?;
        self.store.validate()?;
        self.record.validate()?;
        self.notifier.validate()?;

        Ok(())
    }
}

/// Probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProbeConfig {
    /// HTTP-based probe (external address-echo service)
    Http {
        /// URL of the echo service (response body is the bare address)
        url: String,
    },
}

impl ProbeConfig {
    /// Validate the probe configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProbeConfig::Http { url } => {
                if url.is_empty() {
                    return Err(crate::Error::config("probe URL cannot be empty"));
                }
                Ok(())
            }
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig::Http {
            url: default_probe_url(),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Cloudflare zone-management API
    Cloudflare {
        /// API bearer token with DNS edit permissions
        api_token: String,
        /// TTL written on every record replace (1 = automatic)
        #[serde(default = "default_ttl")]
        ttl: u32,
    },
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::Cloudflare { api_token, .. } => {
                if api_token.is_empty() {
                    return Err(crate::Error::config("API token cannot be empty"));
                }
                Ok(())
            }
        }
    }
}

/// Notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    /// Discord-style webhook notifier
    Discord {
        /// Webhook URL the embed payload is POSTed to
        webhook_url: String,
        /// Message template for change notifications
        #[serde(default)]
        template: MessageTemplate,
    },
}

impl NotifierConfig {
    /// Validate the notifier configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            NotifierConfig::Discord { webhook_url, .. } => {
                if webhook_url.is_empty() {
                    return Err(crate::Error::config("webhook URL cannot be empty"));
                }
                Ok(())
            }
        }
    }
}

/// Reference to the one managed DNS record
///
/// Fixed for the process lifetime, supplied externally, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    /// Zone identifier at the record store
    pub zone_id: String,

    /// Record identifier within the zone
    pub record_id: String,

    /// Record name (e.g. "home.example.com"), written back on every replace
    pub name: String,
}

impl RecordRef {
    /// Create a new record reference
    pub fn new(
        zone_id: impl Into<String>,
        record_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            record_id: record_id.into(),
            name: name.into(),
        }
    }

    /// Validate the record reference
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.zone_id.is_empty() {
            return Err(crate::Error::config("zone ID cannot be empty"));
        }
        if self.record_id.is_empty() {
            return Err(crate::Error::config("record ID cannot be empty"));
        }
        if self.name.is_empty() {
            return Err(crate::Error::config("record name cannot be empty"));
        }
        Ok(())
    }
}

/// Template for change-notification messages
///
/// The description contains a single `{ip}` placeholder; rendering is one
/// substitution, nothing more. All fields are externally configurable data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Embed title
    #[serde(default = "default_title")]
    pub title: String,

    /// Embed description with a `{ip}` substitution point
    #[serde(default = "default_description")]
    pub description: String,

    /// Footer text
    #[serde(default = "default_footer")]
    pub footer_text: String,

    /// Footer icon URL (may be empty)
    #[serde(default)]
    pub footer_icon_url: String,

    /// Optional author name
    #[serde(default)]
    pub author: Option<String>,

    /// Optional image URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MessageTemplate {
    /// Render the description for a given address
    pub fn render_description(&self, ip: &IpAddress) -> String {
        self.description.replace("{ip}", ip.as_str())
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            footer_text: default_footer(),
            footer_icon_url: String::new(),
            author: None,
            image_url: None,
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    3600
}

fn default_probe_url() -> String {
    "https://api64.ipify.org".to_string()
}

fn default_ttl() -> u32 {
    1
}

fn default_title() -> String {
    "IP Monitor Alert".to_string()
}

fn default_description() -> String {
    "The public IP has been updated to: {ip}".to_string()
}

fn default_footer() -> String {
    "IP Monitor System".to_string()
}
