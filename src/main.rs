use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use contacts_settings::ContactsSettings;
use contacts_store::{ContactRepo, Database};
use contacts_telemetry::TelemetryConfig;
use tracing::{info, warn, Level};

/// Contacts web app.
#[derive(Debug, Parser)]
#[command(name = "contacts", version)]
struct Cli {
    /// Settings file (defaults to ~/.contacts/settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Bind address.
    #[arg(long)]
    host: Option<String>,
    /// Bind port; 0 picks a free port.
    #[arg(long)]
    port: Option<u16>,
    /// SQLite database file; in-memory when omitted.
    #[arg(long)]
    db: Option<PathBuf>,
    /// JSON file of contacts loaded into an empty store.
    #[arg(long)]
    seed: Option<PathBuf>,
}

impl Cli {
    fn apply(self, settings: &mut ContactsSettings) {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(db) = self.db {
            settings.store.database_path = Some(db);
        }
        if let Some(seed) = self.seed {
            settings.store.seed_path = Some(seed);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => contacts_settings::load_settings_from_path(path),
        None => contacts_settings::load_settings(),
    }
    .context("failed to load settings")?;
    cli.apply(&mut settings);
    settings.validate().context("invalid settings")?;

    let parsed_level = Level::from_str(&settings.logging.level).ok();
    let log_level = parsed_level.unwrap_or(Level::INFO);
    contacts_telemetry::init_telemetry(&TelemetryConfig {
        log_level,
        json: settings.logging.json,
        ..TelemetryConfig::default()
    })
    .context("failed to initialize logging")?;
    if parsed_level.is_none() {
        warn!(level = %settings.logging.level, "unknown log level, using info");
    }

    let db = match &settings.store.database_path {
        Some(path) => Database::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?,
        None => {
            info!("using in-memory database");
            Database::in_memory().context("failed to open in-memory database")?
        }
    };

    let repo = ContactRepo::new(db);
    if let Some(seed) = &settings.store.seed_path {
        let inserted = repo
            .seed_from_path(seed)
            .with_context(|| format!("failed to seed contacts from {}", seed.display()))?;
        info!(path = %seed.display(), inserted, "seed file processed");
    }

    let handle = contacts_server::start(&settings.server, Arc::new(repo))
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind_addr()))?;
    info!(addr = %handle.addr(), "contacts ready");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl+c")?;

    info!("shutting down");
    handle.shutdown().await;
    Ok(())
}
