//! Revalidation notifications
//!
//! Mutating actions announce which dashboard path now shows stale data.
//! The bus uses `tokio::sync::broadcast` so any number of listeners (a page
//! cache, a live-reload socket, a test) can follow along without the actions
//! knowing about them.
//!
//! ```text
//! create_invoice ──┐
//! update_invoice ──┼──▶ RevalidationBus::revalidate() ──▶ broadcast ──▶ subscribers
//! delete_invoice ──┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = RevalidationBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.revalidate(INVOICES_PATH, RevalidationReason::InvoiceDeleted);
//!
//! let envelope = rx.recv().await?;
//! assert_eq!(envelope.event.path, "/dashboard/invoices");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Why a path was revalidated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidationReason {
    InvoiceCreated,
    InvoiceUpdated,
    InvoiceDeleted,
}

impl RevalidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevalidationReason::InvoiceCreated => "invoice_created",
            RevalidationReason::InvoiceUpdated => "invoice_updated",
            RevalidationReason::InvoiceDeleted => "invoice_deleted",
        }
    }
}

/// A dashboard path whose data changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationEvent {
    pub path: String,
    pub reason: RevalidationReason,
}

/// Envelope wrapping a revalidation event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    pub event: RevalidationEvent,
}

impl EventEnvelope {
    pub fn new(event: RevalidationEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based revalidation bus
///
/// Cheap to clone; clones share the same channel and history.
#[derive(Debug, Clone)]
pub struct RevalidationBus {
    sender: broadcast::Sender<EventEnvelope>,
    last: Arc<RwLock<Option<EventEnvelope>>>,
}

impl RevalidationBus {
    /// Create a new bus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind get a
    /// `Lagged` error on their next `recv()`. A capacity of zero is raised
    /// to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            last: Arc::new(RwLock::new(None)),
        }
    }

    /// Announce that `path` must be revalidated
    ///
    /// Never fails. With no subscribers the notification is only recorded
    /// as the latest one.
    pub fn revalidate(&self, path: &str, reason: RevalidationReason) -> EventEnvelope {
        let envelope = EventEnvelope::new(RevalidationEvent {
            path: path.to_string(),
            reason,
        });

        tracing::debug!(
            path = %path,
            reason = reason.as_str(),
            event_id = %envelope.id,
            "revalidating path"
        );

        if let Ok(mut last) = self.last.write() {
            *last = Some(envelope.clone());
        }

        let _ = self.sender.send(envelope.clone());
        envelope
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// The most recent revalidation, if any
    pub fn last_revalidated(&self) -> Option<EventEnvelope> {
        self.last.read().ok().and_then(|last| last.clone())
    }
}

impl Default for RevalidationBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
