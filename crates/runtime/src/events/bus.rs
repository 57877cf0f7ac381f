//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::RunEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Run started, finished or failed
    Lifecycle,
    /// Per-event step outcomes
    Step,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Delivery is best-effort: slow subscribers lag
/// and publishing never blocks a run.
#[derive(Clone)]
pub struct EventBus {
    lifecycle: broadcast::Sender<RunEvent>,
    step: broadcast::Sender<RunEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lifecycle: broadcast::channel(capacity).0,
            step: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<RunEvent> {
        match topic {
            Topic::Lifecycle => &self.lifecycle,
            Topic::Step => &self.step,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: RunEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RunEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<RunEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::api::RunId;

    #[tokio::test]
    async fn events_route_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut lifecycle = bus.subscribe(Topic::Lifecycle);
        let mut step = bus.subscribe(Topic::Step);

        bus.publish(RunEvent::Started {
            run_id: RunId(1),
            dungeon_id: 3,
            seed: 9,
            at: Utc::now(),
        });

        let event = lifecycle.recv().await.unwrap();
        assert_eq!(event.run_id(), RunId(1));
        assert!(step.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(RunEvent::Failed {
            run_id: RunId(2),
            error: "boom".into(),
            at: Utc::now(),
        });
    }
}
