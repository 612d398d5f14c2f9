//! Check-seed command - Validates a seed fixture.

use std::sync::Arc;

use crate::cli::args::CheckSeedArgs;
use crate::config::{COLLECTION_BILLS, COLLECTION_REPORTS, COLLECTION_TARIFFS, COLLECTION_USERS};
use crate::errors::{AppError, AppResult};
use crate::infra::{Datastore, MemoryStore, Persistence};

const KNOWN_COLLECTIONS: [&str; 4] = [
    COLLECTION_USERS,
    COLLECTION_BILLS,
    COLLECTION_REPORTS,
    COLLECTION_TARIFFS,
];

/// Execute the check-seed command.
///
/// Loads the fixture into a fresh in-memory store and reads every
/// collection back through the typed repositories, so any document that
/// would fail at runtime fails here instead.
pub async fn execute(args: CheckSeedArgs) -> AppResult<()> {
    tracing::info!(path = %args.path.display(), "Validating seed fixture...");

    let raw = tokio::fs::read_to_string(&args.path).await.map_err(|e| {
        AppError::internal(format!("Failed to read {}: {}", args.path.display(), e))
    })?;
    let fixture: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| AppError::internal(format!("Invalid seed fixture: {}", e)))?;

    if let Some(collections) = fixture.as_object() {
        for name in collections.keys() {
            if !KNOWN_COLLECTIONS.contains(&name.as_str()) {
                tracing::warn!(collection = %name, "Unknown collection in fixture");
            }
        }
    }

    let store = Arc::new(MemoryStore::new());
    store
        .seed(fixture)
        .await
        .map_err(|e| AppError::internal(format!("Failed to seed store: {}", e)))?;

    let ds = Persistence::new(store);
    let users = ds.users().list().await?;
    let bills = ds.bills().list_all().await?;
    let reports = ds.reports().list_all().await?;
    let tariffs = ds.tariffs().list().await?;

    println!("{}: {} documents", COLLECTION_USERS, users.len());
    println!("{}: {} documents", COLLECTION_BILLS, bills.len());
    println!("{}: {} documents", COLLECTION_REPORTS, reports.len());
    println!("{}: {} documents", COLLECTION_TARIFFS, tariffs.len());

    let active_tariffs = tariffs.iter().filter(|t| t.active).count();
    if active_tariffs == 0 {
        tracing::warn!("No active tariff; meter readings will be rejected");
    } else if active_tariffs > 1 {
        tracing::warn!(
            count = active_tariffs,
            "Multiple active tariffs; the lowest id wins"
        );
    }

    tracing::info!("Seed fixture is valid");
    Ok(())
}
