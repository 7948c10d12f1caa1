//! Delivery of bus events to WebSocket sessions.
//!
//! The [`NotificationRouter`] subscribes to the event bus and forwards
//! analysis progress, completion and failure to the session that
//! submitted the upload.

pub mod router;

pub use router::NotificationRouter;
