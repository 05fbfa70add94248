//! Domain events emitted by DocFlow operations.
//!
//! Events are handed to an [`EventSink`](crate::traits::EventSink) after
//! the corresponding entities have been persisted.

pub mod document;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, UserId};

pub use document::DocumentEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: EventId,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event, `None` for automated actions.
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A document-related event.
    Document(DocumentEvent),
}

impl DomainEvent {
    /// Create a new domain event stamped with the given time.
    pub fn new(actor_id: Option<UserId>, timestamp: DateTime<Utc>, payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            timestamp,
            actor_id,
            payload,
        }
    }

    /// Shorthand for a document event.
    pub fn document(actor_id: Option<UserId>, timestamp: DateTime<Utc>, event: DocumentEvent) -> Self {
        Self::new(actor_id, timestamp, EventPayload::Document(event))
    }

    /// Stable event name (`"document.status_changed"`).
    pub fn name(&self) -> String {
        match &self.payload {
            EventPayload::Document(e) => format!("document.{}", e.name()),
        }
    }
}
