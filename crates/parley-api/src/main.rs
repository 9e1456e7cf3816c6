//! Parley chat-relay backend entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, initializes the database and services, then
//! serves the HTTP API.

mod http;
mod state;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "parley", version, about = "Chat relay over the Gemini API")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PARLEY_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind.
    #[arg(long, env = "PARLEY_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// SQLite database URL; defaults to a file under the data directory
    /// (`PARLEY_DATA_DIR`, falling back to `~/.parley`).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,parley=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let api_key = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        .map(SecretString::from)
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY (or GOOGLE_API_KEY) must be set"))?;

    let database_url = match &cli.database_url {
        Some(url) => url.clone(),
        None => {
            let data_dir = parley_infra::sqlite::pool::resolve_data_dir();
            tokio::fs::create_dir_all(&data_dir).await?;
            parley_infra::sqlite::pool::default_database_url()
        }
    };

    let state = AppState::init(&database_url, api_key).await?;
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.bind, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "parley listening");
    axum::serve(listener, router).await?;

    Ok(())
}
