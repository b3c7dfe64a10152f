//! teams-notify CLI - send or preview a Teams alert card.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teams_notify::{AlertNotifier, AlertRecord, NotifierConfig};

/// teams-notify - Post alert cards to a Microsoft Teams webhook.
#[derive(Parser)]
#[command(name = "teams-notify")]
#[command(about = "Post alert cards to a Microsoft Teams webhook")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deliver one alert to the webhook
    Send {
        #[command(flatten)]
        alert: AlertArgs,

        #[command(flatten)]
        card: CardArgs,

        #[command(flatten)]
        delivery: DeliveryArgs,
    },

    /// Print the JSON payload without sending it
    Preview {
        #[command(flatten)]
        alert: AlertArgs,

        #[command(flatten)]
        card: CardArgs,
    },
}

#[derive(Args)]
pub struct AlertArgs {
    /// Read the alert from a JSON file ("-" for stdin)
    #[arg(long, conflicts_with_all = ["alert_id", "service_name", "reason", "date"])]
    alert_file: Option<PathBuf>,

    /// Alert identifier
    #[arg(long, required_unless_present = "alert_file")]
    alert_id: Option<String>,

    /// Name of the affected service
    #[arg(long, required_unless_present = "alert_file")]
    service_name: Option<String>,

    /// Why the alert fired
    #[arg(long, required_unless_present = "alert_file")]
    reason: Option<String>,

    /// RFC 3339 timestamp of the alert
    #[arg(long, required_unless_present = "alert_file")]
    date: Option<String>,
}

/// Card overrides. Unset flags keep the values read from the environment.
#[derive(Args)]
pub struct CardArgs {
    /// Timezone used to render the alert date [default: $TIMEZONE or UTC]
    #[arg(long)]
    timezone: Option<String>,

    /// Leave out the alert-id header line
    #[arg(long)]
    no_header: bool,

    /// Show the alert date as received instead of converting it
    #[arg(long)]
    no_timezone: bool,
}

#[derive(Args)]
pub struct DeliveryArgs {
    /// Teams webhook URL [default: $TEAMS_WEBHOOK_URL]
    #[arg(long)]
    webhook_url: Option<String>,

    /// Request timeout in seconds, 0 for none [default: $TEAMS_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl AlertArgs {
    fn into_record(self) -> Result<AlertRecord> {
        if let Some(path) = self.alert_file {
            let raw = if path.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read alert from stdin")?;
                buf
            } else {
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?
            };
            return serde_json::from_str(&raw).context("Failed to parse alert JSON");
        }

        Ok(AlertRecord::new(
            self.alert_id.unwrap_or_default(),
            self.service_name.unwrap_or_default(),
            self.reason.unwrap_or_default(),
            self.date.unwrap_or_default(),
        ))
    }
}

impl CardArgs {
    fn apply(self, mut config: NotifierConfig) -> NotifierConfig {
        if let Some(timezone) = self.timezone.filter(|tz| !tz.is_empty()) {
            config.timezone = timezone;
        }
        if self.no_header {
            config.include_header = false;
        }
        if self.no_timezone {
            config.convert_timezone = false;
        }
        config
    }
}

impl DeliveryArgs {
    fn apply(self, mut config: NotifierConfig) -> NotifierConfig {
        if let Some(url) = self.webhook_url {
            config.webhook_url = url;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("teams_notify=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("teams_notify=info,warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Send {
            alert,
            card,
            delivery,
        } => {
            let record = alert.into_record()?;
            let config = delivery.apply(card.apply(NotifierConfig::from_env()));

            let notifier = AlertNotifier::new(config).context("Failed to create notifier")?;
            notifier
                .send(&record)
                .await
                .with_context(|| format!("Failed to deliver alert {}", record.alert_id))?;
            println!("Alert {} sent", record.alert_id);
        }

        Commands::Preview { alert, card } => {
            let record = alert.into_record()?;
            let notifier = AlertNotifier::new(card.apply(NotifierConfig::from_env()))
                .context("Failed to create notifier")?;
            let message = notifier.prepare(&record)?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
    }

    Ok(())
}
