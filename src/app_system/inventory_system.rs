use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::actor_framework::InventoryActor;
use crate::clients::InventoryClient;
use crate::config::AppConfig;
use crate::error::{InventoryError, InventoryResult};
use crate::inventory::Registry;
use crate::persistence::SnapshotStore;

/// Owns the running inventory actor.
///
/// Startup loads the snapshot and spawns the actor; shutdown closes the
/// channel and waits for the actor to finish.
pub struct InventorySystem {
    pub client: InventoryClient,
    handle: JoinHandle<Registry>,
}

impl InventorySystem {
    pub fn start(config: &AppConfig) -> Self {
        let store = SnapshotStore::new(&config.data_file);
        let registry = load_or_empty(&store);

        let (actor, client) = InventoryActor::new(config.channel_capacity, registry, store);
        let handle = tokio::spawn(actor.run());

        Self { client, handle }
    }

    pub async fn shutdown(self) -> InventoryResult<Registry> {
        info!("Shutting down inventory system...");
        drop(self.client);

        match self.handle.await {
            Ok(registry) => {
                info!("Inventory system shutdown complete.");
                Ok(registry)
            }
            Err(e) => {
                error!("Actor task failed: {:?}", e);
                Err(InventoryError::ActorCommunication(format!("Actor task failed: {e}")))
            }
        }
    }
}

/// Loads the snapshot, falling back to an empty registry when it cannot be
/// read or parsed.
///
/// A corrupt snapshot is left on disk untouched until the next save replaces it.
pub fn load_or_empty(store: &SnapshotStore) -> Registry {
    match store.load() {
        Ok(registry) => {
            info!(
                path = %store.path().display(),
                products = registry.len(),
                "Loaded inventory snapshot"
            );
            registry
        }
        Err(e) => {
            warn!(error = %e, "Could not load inventory snapshot, starting empty");
            Registry::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductDraft;
    use rust_decimal::Decimal;

    fn config_for(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            data_file: dir.path().join("inventory.json"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{\"format\":\"inventory-snapshot\",\"version\":1,\"products\":[{\"id\":1").unwrap();

        let registry = load_or_empty(&SnapshotStore::new(&path));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);

        let system = InventorySystem::start(&config);
        system
            .client
            .create_product(1, ProductDraft::new("A", 2, Decimal::new(1000, 2)))
            .await
            .unwrap();
        system.client.save().await.unwrap();
        let before = system.shutdown().await.unwrap();

        let system = InventorySystem::start(&config);
        let after = system.shutdown().await.unwrap();
        assert_eq!(after, before);
    }
}
