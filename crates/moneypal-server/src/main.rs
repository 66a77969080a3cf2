use anyhow::Result;
use chrono::Utc;
use moneypal_notify::smtp::SmtpMailer;
use moneypal_notify::MailTransport;
use moneypal_storage::FinanceStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use moneypal_server::app;
use moneypal_server::config::ServerConfig;
use moneypal_server::reminders::scheduler::ReminderScheduler;
use moneypal_server::state::AppState;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  moneypal-server [config.toml]    Start the server (default: config/server.toml)");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("moneypal=info".parse()?))
        .init();

    moneypal_common::id::init(1, 1);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("--help" | "-h") => {
            print_usage();
            Ok(())
        }
        other => {
            let config_path = other.unwrap_or("config/server.toml");
            run_server(config_path).await
        }
    }
}

async fn run_server(config_path: &str) -> Result<()> {
    let config = ServerConfig::load(config_path)?;
    config.reminders.validate()?;
    let tz = config.reminders.timezone()?;

    tracing::info!(
        http_port = config.http_port,
        db = %config.database.redacted_url(),
        "moneypal-server starting"
    );

    let store = Arc::new(FinanceStore::new(&config.database.url).await?);
    let mailer: Arc<dyn MailTransport> = Arc::new(SmtpMailer::new(&config.mail)?);

    let scheduler = Arc::new(ReminderScheduler::new(
        store.clone(),
        mailer.clone(),
        config.reminders.hour,
        config.reminders.minute,
        tz,
    ));
    if config.reminders.enabled {
        scheduler.start();
    } else {
        tracing::info!("reminder scheduler disabled");
    }

    let state = AppState {
        store,
        mailer,
        config: Arc::new(config.clone()),
        tz,
        start_time: Utc::now(),
    };

    let http_addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let app = app::build_http_app(state);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!(http = %http_addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("shutting down gracefully");
        })
        .await?;

    scheduler.stop();
    tracing::info!("server stopped");

    Ok(())
}
