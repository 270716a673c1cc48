use anyhow::Result;
use clap::Parser;
use crewnet_backend::bootstrap;
use crewnet_backend::config::CrewnetConfig;
use crewnet_backend::{api, telemetry};

#[derive(Parser)]
#[command(author, version, about = "Crewnet backend daemon")]
struct Args {
    /// Port for the HTTP API (overrides CREWNET_API_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();

    let mut config = CrewnetConfig::from_env();
    if let Some(port) = args.port {
        config.api_port = port;
    }

    let resources = bootstrap::initialize()?;
    tracing::info!(
        seeded_users = resources.seeded_users.len(),
        "bootstrap complete"
    );

    api::serve_http(config, resources.store).await
}
