use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feature_flags::config::SessionConfig;
use feature_flags::models::FeatureTree;
use feature_flags::protocol::HostMessage;
use feature_flags::{api, stdio, Session};

#[derive(Parser)]
#[command(name = "ffl")]
#[command(about = "Feature tree session engine for design-tool plugins")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP host bridge
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run a session over stdin/stdout (line-delimited JSON)
    Stdio,
    /// Render a features JSON file as a text tree
    Render {
        /// Path to a JSON array of features
        path: PathBuf,
    },
}

/// Initialize tracing with output to stderr (for stdio mode) or stdout
fn init_tracing(use_stderr: bool, default_filter: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| {
            default_filter
                .unwrap_or("feature_flags=debug,tower_http=debug")
                .into()
        },
    ));

    if use_stderr {
        // stdio mode: log to stderr so stdout is clean for protocol
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(config: &SessionConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting feature session server on port {}", port);

    let session = api::shared_session();
    let _ticker = api::spawn_ticker(session.clone(), config.tick());
    let app = api::create_router(session);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Feature session listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn render(path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let tree: FeatureTree =
        serde_json::from_str(&content).context("Failed to parse features file")?;

    let mut session = Session::default();
    session.handle_host(HostMessage::InitFeatures {
        features: tree.into_features(),
    })?;
    session.tick();

    print!("{}", session.view().render());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdio mode needs stderr for logging since stdout is the protocol channel
    let use_stderr = matches!(cli.command, Some(Commands::Stdio | Commands::Render { .. }));
    let loaded = SessionConfig::try_load();
    let log_filter = loaded.as_ref().ok().and_then(|c| c.log_filter.clone());
    init_tracing(use_stderr, log_filter.as_deref());

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
        SessionConfig::default()
    });

    match cli.command {
        Some(Commands::Serve { port }) => {
            serve(&config, port.unwrap_or(config.port)).await?;
        }
        Some(Commands::Stdio) => {
            stdio::run_stdio(config.tick()).await?;
        }
        Some(Commands::Render { path }) => {
            render(&path)?;
        }
        None => {
            // Default: start server
            serve(&config, config.port).await?;
        }
    }

    Ok(())
}
