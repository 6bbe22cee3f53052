// # ipmond - IP Monitor Daemon
//
// The ipmond daemon is a THIN integration layer:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Wiring probe, store, and sink into the reconciler
// 4. Running the fixed-period scheduler until SIGINT
//
// All reconciliation logic lives in ipmon-core. Do not add business logic,
// DNS logic, or retry logic here.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Required
// - `IPMON_API_TOKEN`: record store API bearer token
// - `IPMON_ZONE_ID`: zone ID of the managed record
// - `IPMON_RECORD_ID`: record ID within the zone
// - `IPMON_RECORD_NAME`: record name (e.g. "home.example.com")
// - `IPMON_WEBHOOK_URL`: webhook URL for change notifications
//
// ### Optional
// - `IPMON_PROBE_URL`: address-echo service (default https://api64.ipify.org)
// - `IPMON_INTERVAL_SECS`: polling period in seconds (default 3600)
// - `IPMON_TTL`: TTL written on every record replace (default 1 = automatic)
// - `IPMON_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `IPMON_EMBED_TITLE`, `IPMON_EMBED_DESCRIPTION`, `IPMON_EMBED_FOOTER`,
//   `IPMON_EMBED_FOOTER_ICON_URL`: notification template fields; the
//   description may contain a single `{ip}` placeholder
//
// ## Example
//
// ```bash
// export IPMON_API_TOKEN=your_token
// export IPMON_ZONE_ID=023e105f4ecef8ad9ca31a8372d0c353
// export IPMON_RECORD_ID=372e67954025e0ba6aaa6d586b9e0b59
// export IPMON_RECORD_NAME=home.example.com
// export IPMON_WEBHOOK_URL=https://discord.com/api/webhooks/...
//
// ipmond
// ```

use anyhow::Result;
use ipmon_core::config::{
    MessageTemplate, MonitorConfig, NotifierConfig, ProbeConfig, RecordRef, StoreConfig,
};
use ipmon_core::{Reconciler, Scheduler};
use ipmon_notify_discord::DiscordSink;
use ipmon_probe_http::HttpProbe;
use ipmon_store_cloudflare::CloudflareStore;
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum IpmonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<IpmonExitCode> for ExitCode {
    fn from(code: IpmonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration resolved from the environment
struct Config {
    api_token: String,
    zone_id: String,
    record_id: String,
    record_name: String,
    webhook_url: String,
    probe_url: String,
    interval_secs: u64,
    ttl: u32,
    log_level: String,
    embed_title: Option<String>,
    embed_description: Option<String>,
    embed_footer: Option<String>,
    embed_footer_icon_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            api_token: require("IPMON_API_TOKEN")?,
            zone_id: require("IPMON_ZONE_ID")?,
            record_id: require("IPMON_RECORD_ID")?,
            record_name: require("IPMON_RECORD_NAME")?,
            webhook_url: require("IPMON_WEBHOOK_URL")?,
            probe_url: env::var("IPMON_PROBE_URL")
                .unwrap_or_else(|_| "https://api64.ipify.org".to_string()),
            interval_secs: env::var("IPMON_INTERVAL_SECS")
                .ok()
                .map(|s| s.parse())
                .transpose()
                .map_err(|e| anyhow::anyhow!("IPMON_INTERVAL_SECS is not a number: {}", e))?
                .unwrap_or(3600),
            ttl: env::var("IPMON_TTL")
                .ok()
                .map(|s| s.parse())
                .transpose()
                .map_err(|e| anyhow::anyhow!("IPMON_TTL is not a number: {}", e))?
                .unwrap_or(1),
            log_level: env::var("IPMON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            embed_title: env::var("IPMON_EMBED_TITLE").ok(),
            embed_description: env::var("IPMON_EMBED_DESCRIPTION").ok(),
            embed_footer: env::var("IPMON_EMBED_FOOTER").ok(),
            embed_footer_icon_url: env::var("IPMON_EMBED_FOOTER_ICON_URL").ok(),
        })
    }

    /// Validate the configuration beyond presence checks
    fn validate(&self) -> Result<()> {
        // Check for obvious placeholder tokens (common mistake)
        let token_lower = self.api_token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower.contains("example")
        {
            anyhow::bail!(
                "IPMON_API_TOKEN appears to be a placeholder. \
                Use an actual API token from your DNS provider."
            );
        }

        if !self.webhook_url.starts_with("https://") && !self.webhook_url.starts_with("http://") {
            anyhow::bail!(
                "IPMON_WEBHOOK_URL must use HTTP or HTTPS scheme. Got: {}",
                self.webhook_url
            );
        }

        if !self.probe_url.starts_with("https://") && !self.probe_url.starts_with("http://") {
            anyhow::bail!(
                "IPMON_PROBE_URL must use HTTP or HTTPS scheme. Got: {}",
                self.probe_url
            );
        }

        if self.interval_secs == 0 {
            anyhow::bail!("IPMON_INTERVAL_SECS must be > 0");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "IPMON_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Assemble the core monitor configuration
    fn to_monitor_config(&self) -> MonitorConfig {
        let defaults = MessageTemplate::default();
        let template = MessageTemplate {
            title: self.embed_title.clone().unwrap_or(defaults.title),
            description: self
                .embed_description
                .clone()
                .unwrap_or(defaults.description),
            footer_text: self.embed_footer.clone().unwrap_or(defaults.footer_text),
            footer_icon_url: self
                .embed_footer_icon_url
                .clone()
                .unwrap_or(defaults.footer_icon_url),
            author: None,
            image_url: None,
        };

        MonitorConfig {
            probe: ProbeConfig::Http {
                url: self.probe_url.clone(),
            },
            store: StoreConfig::Cloudflare {
                api_token: self.api_token.clone(),
                ttl: self.ttl,
            },
            record: RecordRef::new(
                self.zone_id.clone(),
                self.record_id.clone(),
                self.record_name.clone(),
            ),
            notifier: NotifierConfig::Discord {
                webhook_url: self.webhook_url.clone(),
                template,
            },
            poll_interval_secs: self.interval_secs,
        }
    }
}

fn require(name: &str) -> Result<String> {
    let value =
        env::var(name).map_err(|_| anyhow::anyhow!("{} is required. Set it via: export {}=...", name, name))?;
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }
    Ok(value)
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return IpmonExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return IpmonExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return IpmonExitCode::ConfigError.into();
    }

    info!("Starting ipmond daemon");
    info!(
        record = %config.record_name,
        interval_secs = config.interval_secs,
        "configuration loaded"
    );

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return IpmonExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            // The one path where an error escapes the loop; highest
            // severity, then exit. No crash-safety guarantee is made.
            error!("Daemon error: {}", e);
            IpmonExitCode::RuntimeError
        } else {
            IpmonExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Wire the components and run the reconciliation loop
async fn run_daemon(config: Config) -> Result<()> {
    let monitor_config = config.to_monitor_config();
    monitor_config.validate()?;

    let probe = HttpProbe::from_config(&monitor_config.probe)?;
    let store = CloudflareStore::from_config(&monitor_config.store)?;
    let sink = DiscordSink::from_config(&monitor_config.notifier)?;

    let reconciler = Reconciler::new(
        Box::new(probe),
        Box::new(store),
        Box::new(sink),
        monitor_config.record.clone(),
    );

    let scheduler = Scheduler::new(Duration::from_secs(monitor_config.poll_interval_secs));

    info!("Starting IP address monitoring");
    scheduler.run(&reconciler).await?;

    info!("Shutting down daemon");
    Ok(())
}
