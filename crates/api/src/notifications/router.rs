//! Event-to-WebSocket routing.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::broadcast;
use tonematch_core::progress::{
    MSG_TYPE_ANALYSIS_COMPLETED, MSG_TYPE_ANALYSIS_FAILED, MSG_TYPE_ANALYSIS_PROGRESS,
};
use tonematch_events::{event_types, PlatformEvent};

use crate::ws::WsManager;

/// Routes session-tagged platform events to WebSocket connections.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the routing loop until the [`EventBus`](tonematch_events::EventBus)
    /// is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn route_event(&self, event: &PlatformEvent) {
        let Some(session_id) = event.session_id.as_deref() else {
            return;
        };
        let Some(body) = ws_message_for(event) else {
            return;
        };

        let sent = self
            .ws_manager
            .send_to_session(session_id, Message::Text(body.to_string().into()))
            .await;

        tracing::debug!(
            event_type = %event.event_type,
            session_id,
            connections = sent,
            "Event forwarded to session"
        );
    }
}

/// WebSocket message type for an event, if sessions should see it.
pub fn ws_message_type(event_type: &str) -> Option<&'static str> {
    match event_type {
        event_types::ANALYSIS_PROGRESS => Some(MSG_TYPE_ANALYSIS_PROGRESS),
        event_types::SKIN_TONE_ANALYZED => Some(MSG_TYPE_ANALYSIS_COMPLETED),
        event_types::ANALYSIS_FAILED => Some(MSG_TYPE_ANALYSIS_FAILED),
        _ => None,
    }
}

/// JSON frame sent to the client for an event.
pub fn ws_message_for(event: &PlatformEvent) -> Option<serde_json::Value> {
    let msg_type = ws_message_type(&event.event_type)?;
    Some(json!({
        "type": msg_type,
        "correlation_id": event.correlation_id,
        "data": event.payload,
        "timestamp": event.timestamp,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_analysis_events_reach_sockets() {
        assert_eq!(
            ws_message_type(event_types::ANALYSIS_PROGRESS),
            Some("analysis_progress")
        );
        assert_eq!(
            ws_message_type(event_types::SKIN_TONE_ANALYZED),
            Some("analysis_completed")
        );
        assert_eq!(
            ws_message_type(event_types::ANALYSIS_FAILED),
            Some("analysis_failed")
        );
        assert_eq!(ws_message_type(event_types::FEEDBACK_RECEIVED), None);
    }

    #[test]
    fn frame_wraps_payload() {
        let event = PlatformEvent::new(event_types::ANALYSIS_PROGRESS)
            .with_correlation("abc")
            .with_payload(json!({ "stage": "decoded", "percent": 30 }));
        let frame = ws_message_for(&event).unwrap();
        assert_eq!(frame["type"], "analysis_progress");
        assert_eq!(frame["correlation_id"], "abc");
        assert_eq!(frame["data"]["percent"], 30);
    }

    #[tokio::test]
    async fn routes_to_matching_session_only() {
        let manager = Arc::new(WsManager::new());
        let mut mine = manager.add("c1".into(), Some("s1".into())).await;
        let mut other = manager.add("c2".into(), Some("s2".into())).await;

        let router = NotificationRouter::new(Arc::clone(&manager));
        let event = PlatformEvent::new(event_types::ANALYSIS_FAILED)
            .with_session(Some("s1".into()))
            .with_payload(json!({ "error": "File must be an image" }));
        router.route_event(&event).await;

        let Some(Message::Text(text)) = mine.recv().await else {
            panic!("expected a text frame");
        };
        let frame: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(frame["type"], "analysis_failed");
        assert!(other.try_recv().is_err());
    }
}
