//! In-memory event sink.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use docflow_core::events::DomainEvent;
use docflow_core::result::AppResult;
use docflow_core::traits::EventSink;

/// Append-only in-memory log of published domain events.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    /// Events in publication order.
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl MemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a log from previously published events.
    pub fn with_events(events: Vec<DomainEvent>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Every event published so far, oldest first.
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }

    /// Names of the published events, oldest first.
    pub async fn names(&self) -> Vec<String> {
        self.events.read().await.iter().map(DomainEvent::name).collect()
    }

    /// Number of published events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether nothing has been published.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventSink for MemoryEventLog {
    async fn publish(&self, events: Vec<DomainEvent>) -> AppResult<()> {
        for event in &events {
            info!(
                event_id = %event.id,
                event = %event.name(),
                actor_id = ?event.actor_id,
                "Domain event"
            );
        }
        self.events.write().await.extend(events);
        Ok(())
    }
}
