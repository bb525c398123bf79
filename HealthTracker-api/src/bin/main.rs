use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_tracker_api::api::create_application;
use health_tracker_data::database::DatabaseConfig;
use health_tracker_data::gemini::{GeminiClient, GeminiConfig, SharedReadingExtractor};
use health_tracker_data::repository::create_repository;
use health_tracker_domain::services::BloodPressureUseCases;

const DEFAULT_PORT: u16 = 3000;

/// The main entry point for the HealthTracker API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Creates the configured blood pressure repository
/// 4. Creates the Gemini extraction client
/// 5. Creates and starts the Axum web application
/// 6. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_ansi(true)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stdout))
        .with(env_filter)
        .init();

    info!("Starting HealthTracker API server");

    let database_config = DatabaseConfig::from_env()
        .context("invalid database configuration")?;
    info!("Using {:?} storage backend", database_config.backend);

    let repository = create_repository(&database_config)
        .context("failed to create the blood pressure repository")?;

    let gemini_config = GeminiConfig::from_env();
    let extractor: SharedReadingExtractor = Arc::new(
        GeminiClient::new(gemini_config).context("failed to create the Gemini client")?,
    );

    let use_cases = BloodPressureUseCases::new(repository, extractor);

    // Create the Axum application with all routes and middleware
    let app = create_application(use_cases);

    let port = match std::env::var("PORT") {
        Ok(value) => value.parse::<u16>().unwrap_or_else(|_| {
            warn!("Invalid PORT {}, using {}", value, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    // Create a TCP listener and bind to the address
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for CTRL+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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

    info!("Shutting down server...");
}
