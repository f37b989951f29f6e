use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use crate::whiteboard::importer::ImportResult;

/// The latest diagram for a client, `None` until generation finishes.
pub type Delivery = Option<Arc<ImportResult>>;

/// Generated diagrams keyed by client id, waiting to be pushed over a socket.
///
/// A generate request opens a slot and publishes into it when done; a socket
/// for that id may subscribe before or after publication. The slot is closed
/// once a socket that received the diagram disconnects.
#[derive(Clone, Default)]
pub struct DiagramHub {
    slots: Arc<Mutex<HashMap<String, watch::Sender<Delivery>>>>,
}

impl DiagramHub {
    /// Opens an empty slot under a fresh client id.
    pub async fn open(&self) -> String {
        let client_id = format!("client-{}", Uuid::new_v4().simple());
        let (sender, _) = watch::channel(None);
        self.slots.lock().await.insert(client_id.clone(), sender);
        client_id
    }

    pub async fn publish(&self, client_id: &str, diagram: ImportResult) {
        let mut slots = self.slots.lock().await;
        let slot = slots
            .entry(client_id.to_string())
            .or_insert_with(|| watch::channel(None).0);
        slot.send_replace(Some(Arc::new(diagram)));
    }

    /// Receiver for an opened slot, or `None` for an unknown client id.
    pub async fn subscribe(&self, client_id: &str) -> Option<watch::Receiver<Delivery>> {
        self.slots
            .lock()
            .await
            .get(client_id)
            .map(watch::Sender::subscribe)
    }

    pub async fn close(&self, client_id: &str) {
        self.slots.lock().await.remove(client_id);
    }

    #[cfg(test)]
    pub async fn is_open(&self, client_id: &str) -> bool {
        self.slots.lock().await.contains_key(client_id)
    }

    /// Waits until the slot holds a diagram.
    #[cfg(test)]
    pub async fn wait_for(&self, client_id: &str) -> Arc<ImportResult> {
        let mut rx = self.subscribe(client_id).await.expect("slot is open");
        loop {
            if let Some(diagram) = rx.borrow_and_update().clone() {
                return diagram;
            }
            rx.changed().await.expect("slot stays open");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::whiteboard::importer::import_shapes;

    #[tokio::test]
    async fn test_subscriber_sees_later_publication() {
        let hub = DiagramHub::default();
        let id = hub.open().await;
        let mut rx = hub.subscribe(&id).await.unwrap();
        assert!(rx.borrow().is_none());

        hub.publish(&id, import_shapes(&[json!({ "id": "a", "type": "text" })]))
            .await;

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().shapes.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_client_has_no_slot() {
        let hub = DiagramHub::default();
        assert!(hub.subscribe("client-nope").await.is_none());

        let id = hub.open().await;
        assert!(id.starts_with("client-"));
        hub.close(&id).await;
        assert!(!hub.is_open(&id).await);
    }
}
