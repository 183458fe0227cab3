use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::InventoryClient;
use crate::domain::{Product, ProductDraft, ProductId};
use crate::error::{InventoryError, InventoryResult};
use crate::inventory::{Registry, SummaryReport};
use crate::persistence::SnapshotStore;

// =============================================================================
// 1. MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<InventoryResult<T>>;

#[derive(Debug)]
pub enum InventoryRequest {
    Create {
        id: ProductId,
        draft: ProductDraft,
        respond_to: Response<Product>,
    },
    Get {
        id: ProductId,
        respond_to: Response<Product>,
    },
    Contains {
        id: ProductId,
        respond_to: Response<bool>,
    },
    List {
        respond_to: Response<Vec<Product>>,
    },
    Update {
        id: ProductId,
        draft: ProductDraft,
        respond_to: Response<Product>,
    },
    Delete {
        id: ProductId,
        respond_to: Response<Product>,
    },
    Summary {
        respond_to: Response<SummaryReport>,
    },
    Save {
        respond_to: Response<()>,
    },
}

// =============================================================================
// 2. THE ACTOR
// =============================================================================

/// Sole owner of the registry.
///
/// Requests are applied one at a time in arrival order, so no caller can
/// observe a partially applied mutation.
pub struct InventoryActor {
    receiver: mpsc::Receiver<InventoryRequest>,
    registry: Registry,
    store: SnapshotStore,
}

impl InventoryActor {
    pub fn new(buffer_size: usize, registry: Registry, store: SnapshotStore) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            registry,
            store,
        };
        (actor, InventoryClient::new(sender))
    }

    /// Processes requests until every client has been dropped, then hands the
    /// registry back.
    #[instrument(name = "inventory_actor", skip(self))]
    pub async fn run(mut self) -> Registry {
        info!(products = self.registry.len(), "Inventory actor starting");
        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg).await;
        }
        info!(products = self.registry.len(), "Inventory actor stopped");
        self.registry
    }

    async fn handle(&mut self, msg: InventoryRequest) {
        match msg {
            InventoryRequest::Create { id, draft, respond_to } => {
                let result = self.registry.create(id, draft).cloned();
                log_outcome("create", id, &result);
                let _ = respond_to.send(result);
            }
            InventoryRequest::Get { id, respond_to } => {
                let _ = respond_to.send(self.registry.get(id).cloned());
            }
            InventoryRequest::Contains { id, respond_to } => {
                let _ = respond_to.send(Ok(self.registry.contains(id)));
            }
            InventoryRequest::List { respond_to } => {
                let _ = respond_to.send(Ok(self.registry.list()));
            }
            InventoryRequest::Update { id, draft, respond_to } => {
                let result = self.registry.update(id, draft).cloned();
                log_outcome("update", id, &result);
                let _ = respond_to.send(result);
            }
            InventoryRequest::Delete { id, respond_to } => {
                let result = self.registry.delete(id);
                log_outcome("delete", id, &result);
                let _ = respond_to.send(result);
            }
            InventoryRequest::Summary { respond_to } => {
                let _ = respond_to.send(Ok(self.registry.summary()));
            }
            InventoryRequest::Save { respond_to } => {
                let result = self.save().await;
                match &result {
                    Ok(()) => info!(
                        path = %self.store.path().display(),
                        products = self.registry.len(),
                        "Inventory saved"
                    ),
                    Err(e) => error!(error = %e, "Inventory save failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }

    /// Writes the snapshot on the blocking pool. The actor waits for the
    /// write, so no request is applied while a save is in flight.
    async fn save(&self) -> InventoryResult<()> {
        let store = self.store.clone();
        let registry = self.registry.clone();
        tokio::task::spawn_blocking(move || store.save(&registry))
            .await
            .map_err(|e| InventoryError::ActorCommunication(format!("Save task failed: {e}")))?
            .map_err(InventoryError::from)
    }
}

fn log_outcome<T>(op: &'static str, id: ProductId, result: &InventoryResult<T>) {
    match result {
        Ok(_) => debug!(op, id, "Applied"),
        Err(e) => warn!(op, id, error = %e, "Rejected"),
    }
}
