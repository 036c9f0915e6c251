use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use medscribe::application::ports::{AudioStore, LexiconRepository, TranscriptionRepository};
use medscribe::application::retry::RetryController;
use medscribe::application::services::{TranscriptionInvoker, TranscriptionService};
use medscribe::infrastructure::audio::TranscriptionEngineFactory;
use medscribe::infrastructure::observability::{TracingConfig, init_tracing};
use medscribe::infrastructure::persistence::{
    PgLexiconRepository, PgTranscriptionRepository, connect_policy, create_pool, run_migrations,
};
use medscribe::infrastructure::storage::LocalAudioStore;
use medscribe::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = Settings::load().context("Failed to load settings")?;

    let tracing_config = TracingConfig::new(environment.as_str(), settings.logging.enable_json)
        .with_default_filter(settings.logging.level.clone())
        .apply_env_overrides();
    init_tracing(&tracing_config);

    let pool = create_pool(
        &settings.database.url,
        settings.database.max_connections,
        &RetryController::new(connect_policy()),
    )
    .await
    .context("Failed to connect to PostgreSQL")?;

    if settings.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let engine = TranscriptionEngineFactory::create(&settings.transcription)
        .context("Failed to configure transcription engine")?;
    let retry_policy = settings
        .transcription
        .retry
        .to_policy()
        .context("Invalid transcription retry policy")?;
    let invoker = TranscriptionInvoker::new(engine, RetryController::new(retry_policy));

    let transcription_repository: Arc<dyn TranscriptionRepository> =
        Arc::new(PgTranscriptionRepository::new(pool.clone()));
    let lexicon_repository: Arc<dyn LexiconRepository> =
        Arc::new(PgLexiconRepository::new(pool.clone()));
    let audio_store: Arc<dyn AudioStore> = Arc::new(
        LocalAudioStore::new(settings.storage.audio_dir.clone())
            .context("Failed to prepare audio storage")?,
    );

    let transcription_service = Arc::new(TranscriptionService::new(
        invoker,
        transcription_repository,
        Arc::clone(&lexicon_repository),
        audio_store,
        settings.storage.max_upload_bytes,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        transcription_service,
        lexicon_repository,
        settings: Arc::new(settings),
    };
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
