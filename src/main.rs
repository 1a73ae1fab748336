use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_annotator::{
    annotation::{LabelAnnotator, VisionClient},
    cache::{CacheStore, MemoryCacheStore, SqliteCacheStore},
    config::{CacheBackend, Config},
    database::Database,
    services::LabelService,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "image-annotator")]
#[command(version)]
#[command(about = "Labels uploaded images and caches the results by content hash")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Cache database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Label detection API key (overrides config file)
    #[arg(long, env = "VISION_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("image_annotator={},tower_http=trace", cli.log_level)
    } else {
        format!("image_annotator={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Image Annotator v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.cache.database.url = database_url;
    }
    if let Some(api_key) = cli.api_key {
        config.vision.api_key = Some(api_key);
    }

    let cache: Arc<dyn CacheStore> = match config.cache.backend {
        CacheBackend::Sqlite => {
            info!("Using cache database: {}", config.cache.database.url);
            let database = Database::new(&config.cache.database).await?;
            database.migrate().await?;
            info!("Cache database connection established and migrations applied");
            Arc::new(SqliteCacheStore::new(database.pool()))
        }
        CacheBackend::Memory => {
            warn!("Using in-memory cache; labels will not survive a restart");
            Arc::new(MemoryCacheStore::new())
        }
    };

    if config.vision.api_key.is_none() {
        warn!("No label detection API key configured; requests are sent unauthenticated");
    }
    let annotator: Arc<dyn LabelAnnotator> = Arc::new(VisionClient::new(&config.vision)?);
    info!("Label detection client initialized for {}", config.vision.endpoint);

    let label_service = LabelService::new(cache, annotator);
    let web_server = WebServer::new(&config, label_service)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
