//! axiom-web: Email frustration dashboard server

use axiom_core::cache::{FileStore, MemoryStore, SnapshotStore};
use axiom_core::source::{EmailSource, FixtureSource, HttpEmailSource};
use axiom_core::{AxiomConfig, DashboardController};
use axiom_web::{router, AppState};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = match config_path.as_deref() {
        Some(path) => AxiomConfig::from_file(Path::new(path))?,
        None => AxiomConfig::development(),
    }
    .with_env_overrides();

    init_logging(&config);

    info!("Starting axiom-web v{}", env!("CARGO_PKG_VERSION"));
    match config_path {
        Some(path) => info!("Configuration loaded from {}", path),
        None => info!("No config file specified, using development defaults"),
    }

    let source: Arc<dyn EmailSource> = match config.source.fixture_path {
        Some(ref path) => {
            info!("Reading emails from fixture {}", path);
            Arc::new(FixtureSource::new(path))
        }
        None => {
            info!("Fetching emails from {}", config.source.base_url);
            Arc::new(HttpEmailSource::from_config(&config.source)?)
        }
    };

    let cache: Arc<dyn SnapshotStore> = match config.cache.path {
        Some(ref path) => {
            info!("Snapshot cache: {}", path);
            Arc::new(FileStore::open(path)?)
        }
        None => {
            warn!("No cache path configured, snapshots will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    let mut dashboard = DashboardController::new(source, cache);
    dashboard.mount().await;
    info!("Dashboard {} with {} emails", dashboard.phase().as_str(), dashboard.documents().len());

    let app = router(AppState::new(dashboard));

    let addr = &config.server.listen_addr;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &AxiomConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
