use clap::Parser;
use tracing::info;

use esplugin::api;
use esplugin::cli;
use esplugin::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args and env vars
    let args = cli::Cli::parse();
    logging::init(args.log_json);
    let settings = args.into_settings()?;
    let socket_address = settings.socket_address();

    // Build Axum Router
    let api = api::api(&settings);

    // Start server
    info!("Starting esplugin on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(api.into_make_service())
        .await?;

    Ok(())
}
