//! Tonematch event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the event envelope shared by every publisher.
//! - [`EventPersistence`]: background service that durably writes events
//!   to the `events` table.

pub mod bus;
pub mod persistence;

pub use bus::{event_types, EventBus, PlatformEvent};
pub use persistence::EventPersistence;
