//! Mood Journal server: emotion scheduler plus the emotions REST API.

use std::sync::Arc;

use axum::http::HeaderValue;
use thiserror::Error;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use mood_journal::adapters::ai::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, LlmEmotionClassifier,
    OpenAIConfig, OpenAIProvider,
};
use mood_journal::adapters::http::{emotion_routes, EmotionsAppState};
use mood_journal::adapters::{PostgresEmotionRepository, PostgresJournalReader, SystemClock};
use mood_journal::application::{
    AnalyzeUserDayHandler, CatchUpSweeper, ClassifierAdapter, DailyAnalysisHandler,
    EmotionScheduler, SchedulerError,
};
use mood_journal::config::{AiConfig, AiProvider, AppConfig, ConfigError, ServerConfig, ValidationError};
use mood_journal::ports::{AIError, AIProvider, Clock, EmotionClassifier, EmotionRepository, JournalReader};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting mood journal server"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    let emotions: Arc<dyn EmotionRepository> = Arc::new(PostgresEmotionRepository::new(pool.clone()));
    let journal: Arc<dyn JournalReader> = Arc::new(PostgresJournalReader::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let classifier = build_classifier(&config.ai)?;
    let adapter = Arc::new(ClassifierAdapter::with_policy(
        classifier,
        config.ai.classifier_policy(),
    ));
    let analyzer = Arc::new(AnalyzeUserDayHandler::new(
        emotions.clone(),
        journal.clone(),
        adapter,
    ));
    let daily = Arc::new(DailyAnalysisHandler::new(
        journal.clone(),
        analyzer.clone(),
        config.scheduler.daily_pacing(),
    ));
    let sweeper = Arc::new(CatchUpSweeper::new(
        emotions.clone(),
        journal.clone(),
        analyzer.clone(),
        clock.clone(),
        config.scheduler.sweep_pacing(),
    ));
    let scheduler = EmotionScheduler::new(
        analyzer,
        daily,
        sweeper,
        clock.clone(),
        config.scheduler.loop_config()?,
    );

    let scheduler_handle = if config.scheduler.enabled {
        Some(scheduler.start()?)
    } else {
        warn!("Emotion scheduler disabled; analysis runs only on manual requests");
        None
    };

    let state = EmotionsAppState {
        emotions,
        journal,
        clock,
        scheduler,
    };
    let app = emotion_routes(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler_handle {
        info!("Stopping emotion scheduler");
        handle.stop().await?;
    }
    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// LLM classifier for the configured provider.
fn build_classifier(ai: &AiConfig) -> Result<Arc<dyn EmotionClassifier>, StartupError> {
    let api_key = ai.required_api_key()?;

    let provider: Arc<dyn AIProvider> = match ai.primary_provider {
        AiProvider::Gemini => {
            let mut config = GeminiConfig::new(api_key)
                .with_timeout(ai.request_timeout())
                .with_max_retries(ai.provider_max_retries);
            if let Some(model) = &ai.model {
                config = config.with_model(model.clone());
            }
            Arc::new(GeminiProvider::new(config)?)
        }
        AiProvider::OpenAI => {
            let mut config = OpenAIConfig::new(api_key)
                .with_timeout(ai.request_timeout())
                .with_max_retries(ai.provider_max_retries);
            if let Some(model) = &ai.model {
                config = config.with_model(model.clone());
            }
            Arc::new(OpenAIProvider::new(config)?)
        }
        AiProvider::Anthropic => {
            let mut config = AnthropicConfig::new(api_key)
                .with_timeout(ai.request_timeout())
                .with_max_retries(ai.provider_max_retries);
            if let Some(model) = &ai.model {
                config = config.with_model(model.clone());
            }
            Arc::new(AnthropicProvider::new(config)?)
        }
    };

    let info = provider.provider_info();
    info!(provider = %info.name, model = %info.model, "Emotion classifier ready");
    Ok(Arc::new(LlmEmotionClassifier::new(provider)))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() && !server.is_production() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
