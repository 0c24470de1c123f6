use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vibes_api::ApiState;
use vibes_ballot::Ballot;
use vibes_cli::NodeConfig;
use vibes_storage::BallotStore;

#[derive(Parser)]
#[command(name = "vibesd")]
#[command(about = "Vibes ballot node", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to serve the API on (overrides config)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Snapshot directory (overrides config)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// Keep the ballot in memory only
    #[arg(long)]
    no_persist: bool,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c_listener_failed");
        std::future::pending::<()>().await;
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NodeConfig::load(path)?,
        None => NodeConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.api.listen = listen;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if cli.no_persist {
        config.storage.enabled = false;
    }

    init_tracing(&config.log_level);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        "starting_vibesd"
    );

    let (ballot, store) = if config.storage.enabled {
        let store = BallotStore::open(config.storage.data_path(), config.storage.snapshot.clone())?;
        let existing = store.exists();
        let ballot = store.load()?;
        info!(
            dir = %store.data_dir().display(),
            snapshot = store.name(),
            existing,
            "ballot_snapshot_opened"
        );
        (ballot, Some(store))
    } else {
        warn!("persistence_disabled");
        (Ballot::new(), None)
    };

    let tally = ballot.tally();
    info!(good = tally.good, bad = tally.bad, "ballot_loaded");

    let mut state = ApiState::new(Arc::new(ballot));
    if let Some(store) = store {
        state = state.with_store(store);
    }

    vibes_api::start_server(config.api.listen, state.clone(), shutdown_signal()).await?;

    state.persist().await?;
    let tally = state.ballot.tally();
    info!(good = tally.good, bad = tally.bad, "ballot_saved_on_shutdown");

    Ok(())
}
