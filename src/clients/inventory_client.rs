use tokio::sync::mpsc;

use crate::actor_framework::InventoryRequest;
use crate::domain::{Product, ProductDraft, ProductId};
use crate::inventory::SummaryReport;

/// Client for interacting with the inventory actor.
///
/// Cheap to clone; the actor stops once every clone has been dropped.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }
}

client_method!(InventoryClient => fn create_product(id: ProductId, draft: ProductDraft) -> Product as InventoryRequest::Create);
client_method!(InventoryClient => fn get_product(id: ProductId) -> Product as InventoryRequest::Get);
client_method!(InventoryClient => fn contains_product(id: ProductId) -> bool as InventoryRequest::Contains);
client_method!(InventoryClient => fn list_products() -> Vec<Product> as InventoryRequest::List);
client_method!(InventoryClient => fn update_product(id: ProductId, draft: ProductDraft) -> Product as InventoryRequest::Update);
client_method!(InventoryClient => fn delete_product(id: ProductId) -> Product as InventoryRequest::Delete);
client_method!(InventoryClient => fn summary() -> SummaryReport as InventoryRequest::Summary);
client_method!(InventoryClient => fn save() -> () as InventoryRequest::Save);
