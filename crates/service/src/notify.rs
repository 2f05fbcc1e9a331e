//! Realtime event hub.
//!
//! Push-notification-style fan-out over a tokio broadcast channel. No
//! delivery guarantee: lagged subscribers drop the oldest events.

use models::order::OrderStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderEvent {
    Placed {
        order_id: i32,
        service_id: i32,
        customer_id: i32,
        provider_id: i32,
    },
    StatusChanged {
        order_id: i32,
        customer_id: i32,
        provider_id: i32,
        status: OrderStatus,
    },
}

impl OrderEvent {
    /// Whether this event should be pushed to the given user, either as
    /// the ordering customer or as the provider.
    pub fn concerns(&self, user_id: i32) -> bool {
        match self {
            OrderEvent::Placed { customer_id, provider_id, .. }
            | OrderEvent::StatusChanged { customer_id, provider_id, .. } => {
                *customer_id == user_id || *provider_id == user_id
            }
        }
    }
}

#[derive(Clone)]
pub struct EventHub {
    tx: broadcast::Sender<OrderEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }

    /// Publish to all current subscribers. Having no subscribers is not
    /// an error; nobody is listening for pushes right now.
    pub fn publish(&self, event: OrderEvent) {
        debug!(?event, "publishing order event");
        let _ = self.tx.send(event);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let hub = EventHub::new(8);
        let mut rx = hub.subscribe();
        hub.publish(OrderEvent::Placed { order_id: 1, service_id: 2, customer_id: 3, provider_id: 4 });
        let ev = rx.recv().await.unwrap();
        assert!(ev.concerns(3));
        assert!(ev.concerns(4));
        assert!(!ev.concerns(5));
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let hub = EventHub::default();
        hub.publish(OrderEvent::StatusChanged {
            order_id: 1,
            customer_id: 2,
            provider_id: 3,
            status: OrderStatus::Accepted,
        });
    }

    #[test]
    fn events_serialize_with_kind_tag() {
        let ev = OrderEvent::StatusChanged {
            order_id: 9,
            customer_id: 1,
            provider_id: 2,
            status: OrderStatus::OnTheWay,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["kind"], "status_changed");
        assert_eq!(json["status"], "on_the_way");
    }
}
