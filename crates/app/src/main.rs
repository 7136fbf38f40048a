use std::sync::Arc;

use engine::{ExpenseStore, JsonFileStore, MemoryStore};
use settings::Storage;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let store: Arc<dyn ExpenseStore> = match &settings.storage {
        Storage::Memory => {
            tracing::info!("Using in-memory storage, expenses will not be persisted");
            Arc::new(MemoryStore::default())
        }
        Storage::Json(path) => {
            tracing::info!("Using JSON storage at {path}");
            Arc::new(JsonFileStore::new(path))
        }
    };

    let engine = engine::Engine::builder().store(store).build().await?;

    let listener = server::bind_listener(
        &settings.server.bind,
        settings.server.port,
        settings.server.port_attempts,
    )
    .await?;

    server::run_with_listener(engine, listener).await?;
    Ok(())
}
