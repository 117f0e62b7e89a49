use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resumatch::analyzer::AnalyzerClient;
use resumatch::api::{create_router, AppState};
use resumatch::auth::AuthGate;
use resumatch::config::Config;
use resumatch::db::{Database, LibSqlRecordStore, RecordStore};
use resumatch::processing::{PdfTextExtractor, TextExtractor};
use resumatch::storage::{ObjectStore, S3ObjectStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resumatch=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.auth.expected_audience.is_none() {
        tracing::warn!(
            "AUTH_EXPECTED_AUDIENCE is not set — tokens issued for any client are accepted."
        );
    }

    tracing::info!("Connecting to database...");
    let db = Database::connect_with_retry(&config.database).await?;
    let records: Arc<dyn RecordStore> = Arc::new(LibSqlRecordStore::new(db));

    tracing::info!(endpoint = %config.storage.endpoint, "Initializing object store client");
    let objects: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(&config.storage));

    let extractor: Arc<dyn TextExtractor> = Arc::new(PdfTextExtractor);
    let analyzer = AnalyzerClient::new(&config.analyzer);
    let auth = AuthGate::new(&config.auth);

    tokio::fs::create_dir_all(&config.ingest.staging_dir).await?;

    let state = AppState::new(config.clone(), records, objects, extractor, analyzer, auth);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Resumatch starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
