//! ClearWay server - accessibility-aware map proxy.
//!
//! Serves the tile proxy, obstacle-aware walking directions, place
//! search, and obstacle report plumbing over HTTP.

mod error;
mod routes;
mod state;

use clap::Parser;
use clearway::config::Settings;
use clearway::logging::init_logging;
use state::AppState;
use std::process;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "clearway-server")]
#[command(about = "Accessibility-aware map proxy server", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(error) = run(args).await {
        eprintln!("clearway-server failed: {error}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let _logging_guard = init_logging(&args.log_dir, "clearway.log")?;

    let settings = Settings::from_env()?;
    info!(
        version = clearway::VERSION,
        max_zoom = settings.max_zoom,
        tile_cache_entries = settings.tile_cache.max_entries,
        session_cache_entries = settings.session.max_entries,
        "starting clearway-server"
    );

    let state = Arc::new(AppState::from_settings(settings)?);
    let router = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!(host = %args.host, port = args.port, "listening");

    axum::serve(listener, router).await?;
    Ok(())
}
