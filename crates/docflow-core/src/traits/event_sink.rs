//! Destination for committed domain events.

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::result::AppResult;

/// Receives domain events after the store has committed the change.
#[async_trait]
pub trait EventSink: Send + Sync + 'static {
    /// Publish a batch of events in emission order.
    async fn publish(&self, events: Vec<DomainEvent>) -> AppResult<()>;
}
