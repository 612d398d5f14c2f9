//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::MemoryStore;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Initialize document store
    let store = Arc::new(MemoryStore::new());
    if let Some(path) = &args.seed {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::internal(format!("Failed to read {}: {}", path.display(), e)))?;
        let fixture = serde_json::from_str(&raw)
            .map_err(|e| AppError::internal(format!("Invalid seed fixture: {}", e)))?;
        store
            .seed(fixture)
            .await
            .map_err(|e| AppError::internal(format!("Failed to seed store: {}", e)))?;
        tracing::info!(path = %path.display(), "Seed fixture loaded");
    }

    // Create application state with centralized service container
    // Services share one datastore hub over the store
    let app_state = AppState::from_store(store, config);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
