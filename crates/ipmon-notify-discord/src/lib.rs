// # Discord Webhook Event Sink
//
// This crate announces reconciliation events as Discord-style embed
// payloads posted to a webhook.
//
// ## Payload Shape
//
// ```json
// { "embeds": [{ "title", "description", "color",
//                "footer": { "text", "icon_url" },
//                "author"?, "image"? }] }
// ```
//
// ## Best-Effort
//
// The sink is fire-and-forget from the reconciler's point of view: a failed
// POST surfaces as `Error::Notify`, which the reconciler logs and ignores.
// Nothing here may block or roll back a record write.
//
// ## Template
//
// The sink accepts already-resolved strings from the configured
// `MessageTemplate`; the only template syntax it relies on is the single
// `{ip}` placeholder substituted by the template itself.

use async_trait::async_trait;
use ipmon_core::config::{MessageTemplate, NotifierConfig};
use ipmon_core::traits::{EventSink, ReconcileEvent};
use ipmon_core::{Error, Result};
use serde::Serialize;
use std::time::Duration;

/// Default HTTP timeout for webhook posts
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Message severity, mapped to a fixed embed color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational (neutral grey)
    Info,
    /// Success (green)
    Success,
    /// Error (red)
    Error,
}

impl Severity {
    /// The embed color for this severity
    pub const fn color(self) -> u32 {
        match self {
            Severity::Info => 0x808080,
            Severity::Success => 0x00FF00,
            Severity::Error => 0xFF0000,
        }
    }
}

/// Webhook payload: a single embed
#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    embeds: [Embed; 1],
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<EmbedImage>,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: String,
    icon_url: String,
}

#[derive(Debug, Serialize)]
struct EmbedAuthor {
    name: String,
}

#[derive(Debug, Serialize)]
struct EmbedImage {
    url: String,
}

/// Render a template into a webhook payload at the given severity
pub fn build_payload(
    template: &MessageTemplate,
    severity: Severity,
    description: String,
) -> WebhookPayload {
    WebhookPayload {
        embeds: [Embed {
            title: template.title.clone(),
            description,
            color: severity.color(),
            footer: EmbedFooter {
                text: template.footer_text.clone(),
                icon_url: template.footer_icon_url.clone(),
            },
            author: template
                .author
                .clone()
                .map(|name| EmbedAuthor { name }),
            image: template
                .image_url
                .clone()
                .map(|url| EmbedImage { url }),
        }],
    }
}

/// Discord webhook event sink
pub struct DiscordSink {
    /// Webhook URL
    /// ⚠️ carries an embedded credential, never log it
    webhook_url: String,

    /// Message template for change announcements
    template: MessageTemplate,

    /// HTTP client
    client: reqwest::Client,
}

// Custom Debug implementation that hides the webhook URL
impl std::fmt::Debug for DiscordSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSink")
            .field("webhook_url", &"<REDACTED>")
            .field("template", &self.template)
            .finish()
    }
}

impl DiscordSink {
    /// Create a new Discord sink
    pub fn new(webhook_url: impl Into<String>, template: MessageTemplate) -> Result<Self> {
        let webhook_url = webhook_url.into();
        if webhook_url.is_empty() {
            return Err(Error::config("webhook URL cannot be empty"));
        }

        Ok(Self {
            webhook_url,
            template,
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        })
    }

    /// Create a sink from configuration
    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        match config {
            NotifierConfig::Discord {
                webhook_url,
                template,
            } => Self::new(webhook_url.clone(), template.clone()),
        }
    }

    async fn post(&self, payload: &WebhookPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::notify(format!("webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::notify(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl EventSink for DiscordSink {
    async fn publish(&self, event: &ReconcileEvent) -> Result<()> {
        match event {
            ReconcileEvent::IpChanged { new_ip, .. } => {
                tracing::debug!(ip = %new_ip, "posting change notification");
                let description = self.template.render_description(new_ip);
                let payload = build_payload(&self.template, Severity::Success, description);
                self.post(&payload).await
            }
        }
    }

    fn sink_name(&self) -> &'static str {
        "discord"
    }
}
