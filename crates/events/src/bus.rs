//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event type names published on the bus.
pub mod event_types {
    /// An upload was analyzed (or served from cache).
    pub const SKIN_TONE_ANALYZED: &str = "skin_tone.analyzed";
    /// Intermediate analysis progress for a WebSocket session.
    pub const ANALYSIS_PROGRESS: &str = "analysis.progress";
    /// An upload was rejected or could not be analyzed.
    pub const ANALYSIS_FAILED: &str = "analysis.failed";
    /// A color recommendation was served.
    pub const COLORS_RECOMMENDED: &str = "colors.recommended";
    /// A product recommendation was served.
    pub const PRODUCTS_RECOMMENDED: &str = "products.recommended";
    /// A user submitted feedback.
    pub const FEEDBACK_RECEIVED: &str = "feedback.received";
}

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Something that happened in the service.
///
/// Constructed via [`PlatformEvent::new`] and enriched with
/// [`with_correlation`](PlatformEvent::with_correlation),
/// [`with_session`](PlatformEvent::with_session) and
/// [`with_payload`](PlatformEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"skin_tone.analyzed"`.
    pub event_type: String,

    /// Ties related events together (the image fingerprint for analyses).
    pub correlation_id: Option<String>,

    /// WebSocket session that should see this event, if any.
    pub session_id: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            correlation_id: None,
            session_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_correlation(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Address the event to a WebSocket session. `None` leaves it unaddressed.
    pub fn with_session(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Progress updates are only interesting while the upload is in flight
    /// and are never written to the database.
    pub fn is_transient(&self) -> bool {
        self.event_type == event_types::ANALYSIS_PROGRESS
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use tonematch_events::bus::{EventBus, PlatformEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PlatformEvent::new("feedback.received"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped silently when
    /// nobody is subscribed.
    pub fn publish(&self, event: PlatformEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
