use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use notifier::config::{ConfigManager, NotifierConfig};
use notifier::constants::settings;
use notifier::database::Database;
use notifier::delivery::{BroadcastChannel, SmtpMailer, WebhookChannel};
use notifier::identity::ConfiguredAdministrators;
use notifier::mail_servers::ConfiguredServers;
use notifier::oauth::OutlookTokenClient;
use notifier::scheduler::{daily_job::run_pass, NotifierScheduler};
use notifier::services::{AlertDispatcher, CheckOutcome, CredentialValidator, OutlookNotifier};
use notifier::store::{self, ParameterStore};

#[derive(Parser)]
#[command(name = "notifier", about = "Outlook client secret expiry monitor")]
struct Args {
    /// Directory holding main.toml, secrets.toml and servers/*.toml
    #[arg(long, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the daily check on its cron schedule until Ctrl-C
    Run,
    /// Run a single check pass and exit
    Check,
    /// Record the client secret expiration date (YYYY-MM-DD, or "none" to clear)
    SetExpiration { date: String },
    /// Print the stored expiration and last-notified dates
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("notifier=info".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("lettre=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let config_manager = ConfigManager::new(args.config_dir.clone()).await?;
    let config = config_manager.get_current_config();

    let database = Arc::new(
        Database::new(&config.database_path)
            .await
            .with_context(|| format!("Failed to open database {}", config.database_path))?,
    );

    match args.command {
        Command::Run => run_service(&config, database).await,
        Command::Check => {
            let notifier = build_notifier(&config, database)?;
            match notifier.run_daily_check().await? {
                CheckOutcome::Notified { alerts, report } => {
                    info!(
                        "Dispatched {} alerts: channel {:?}, {} emails sent, {} failed",
                        alerts.len(),
                        report.channel,
                        report.emails_sent,
                        report.emails_failed
                    );
                }
                outcome => info!("Check complete: {:?}", outcome),
            }
            Ok(())
        }
        Command::SetExpiration { date } => set_expiration(database.as_ref(), &date).await,
        Command::Status => print_status(database.as_ref()).await,
    }
}

fn build_notifier(config: &NotifierConfig, database: Arc<Database>) -> Result<OutlookNotifier> {
    let incoming = if config.incoming_enabled {
        Some(config.incoming_servers.clone())
    } else {
        None
    };
    let directory = Arc::new(ConfiguredServers::new(
        config.outgoing_servers.clone(),
        incoming,
    ));

    let token_timeout = Duration::from_secs(config.token_timeout_seconds);
    let delivery_timeout = Duration::from_secs(config.delivery_timeout_seconds);

    let issuer = Arc::new(OutlookTokenClient::new(&config.outlook, token_timeout)?);
    let validator = CredentialValidator::new(issuer, token_timeout);

    let channel = WebhookChannel::from_config(config.admin_channel.as_ref(), delivery_timeout)?
        .map(|channel| Arc::new(channel) as Arc<dyn BroadcastChannel>);
    if channel.is_none() {
        warn!("No admin channel webhook configured; alerts go to email only");
    }

    let mailer = Arc::new(SmtpMailer::new(&config.smtp)?);
    let admins = Arc::new(ConfiguredAdministrators::new(config.administrators.clone()));
    let dispatcher = AlertDispatcher::new(
        channel,
        mailer,
        admins,
        config.email_from().to_string(),
        delivery_timeout,
    );

    Ok(OutlookNotifier::new(database, directory, validator, dispatcher))
}

async fn run_service(config: &NotifierConfig, database: Arc<Database>) -> Result<()> {
    info!("Starting Outlook secret notifier");

    let notifier = Arc::new(build_notifier(config, database)?);
    let scheduler = NotifierScheduler::new(notifier.clone(), config.check_schedule.clone()).await?;
    scheduler.start().await?;

    if config.run_on_startup {
        info!("Running startup check");
        run_pass(&notifier).await;
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutting down");
    scheduler.shutdown().await
}

async fn set_expiration(database: &Database, value: &str) -> Result<()> {
    let value = value.trim();
    let date = if value.eq_ignore_ascii_case("none") || value.is_empty() {
        None
    } else {
        match store::parse_date(value) {
            Some(date) => Some(date),
            None => bail!("Invalid date '{}', expected YYYY-MM-DD or 'none'", value),
        }
    };

    store::store_expiration(database, date).await?;
    match date {
        Some(date) => info!("Outlook client secret expiration set to {}", date),
        None => info!("Outlook client secret expiration cleared"),
    }
    Ok(())
}

async fn print_status(database: &Database) -> Result<()> {
    let expiration = database
        .get_param(settings::SECRET_EXPIRATION_KEY, "")
        .await?;
    let last_notified = store::load_last_notified(database).await?;

    let show = |value: &str| {
        if value.trim().is_empty() {
            "(not set)".to_string()
        } else {
            value.trim().to_string()
        }
    };

    println!("{}: {}", settings::SECRET_EXPIRATION_KEY, show(&expiration));
    println!("{}: {}", settings::LAST_NOTIFIED_KEY, show(&last_notified));

    for setting in database.get_all_settings().await? {
        if setting.key == settings::SECRET_EXPIRATION_KEY || setting.key == settings::LAST_NOTIFIED_KEY {
            println!("  {} updated at {}", setting.key, setting.updated_at.to_rfc3339());
        }
    }
    Ok(())
}
