//! # Mock Framework
//!
//! Utilities for testing code that drives an [`InventoryClient`] without a
//! running actor.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_contains`] or [`expect_save`] to assert
//! which request arrived and answer it however the test needs.

use tokio::sync::mpsc;

use crate::actor_framework::{InventoryRequest, Response};
use crate::clients::InventoryClient;
use crate::domain::{Product, ProductDraft, ProductId};
use crate::inventory::SummaryReport;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client(buffer_size: usize) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Contains request
pub async fn expect_contains(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, Response<bool>)> {
    match receiver.recv().await {
        Some(InventoryRequest::Contains { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, ProductDraft, Response<Product>)> {
    match receiver.recv().await {
        Some(InventoryRequest::Create { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Summary request
pub async fn expect_summary(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<Response<SummaryReport>> {
    match receiver.recv().await {
        Some(InventoryRequest::Summary { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save(receiver: &mut mpsc::Receiver<InventoryRequest>) -> Option<Response<()>> {
    match receiver.recv().await {
        Some(InventoryRequest::Save { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_product(5, ProductDraft::new("Test", 1, Decimal::ONE))
                .await
        });

        let (id, draft, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(id, 5);
        assert_eq!(draft.name, "Test");
        responder.send(Err(InventoryError::DuplicateId(5))).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Err(InventoryError::DuplicateId(5))));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let save_task = tokio::spawn(async move { client.save().await });
        let responder = expect_save(&mut receiver).await.expect("Expected Save request");
        drop(responder);

        let result = save_task.await.unwrap();
        assert!(matches!(result, Err(InventoryError::ActorCommunication(_))));
    }
}
