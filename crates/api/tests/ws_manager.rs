//! Tests for `WsManager`.
//!
//! These exercise the connection manager directly, without performing any
//! HTTP upgrades.

use axum::extract::ws::Message;
use tonematch_api::ws::WsManager;

// ---------------------------------------------------------------------------
// Test: add() and remove() track the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx = manager.add("conn-1".to_string(), None).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: send_to_session() reaches only connections with that tag
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_session_targets_tagged_connections() {
    let manager = WsManager::new();

    let mut a1 = manager.add("conn-1".to_string(), Some("s-a".into())).await;
    let mut a2 = manager.add("conn-2".to_string(), Some("s-a".into())).await;
    let mut b = manager.add("conn-3".to_string(), Some("s-b".into())).await;
    let mut untagged = manager.add("conn-4".to_string(), None).await;

    let sent = manager
        .send_to_session("s-a", Message::Text("hello".into()))
        .await;
    assert_eq!(sent, 2);

    assert!(matches!(a1.recv().await, Some(Message::Text(_))));
    assert!(matches!(a2.recv().await, Some(Message::Text(_))));
    assert!(b.try_recv().is_err());
    assert!(untagged.try_recv().is_err());

    let mut ids = manager.get_by_session("s-a").await;
    ids.sort();
    assert_eq!(ids, vec!["conn-1".to_string(), "conn-2".to_string()]);
    assert_eq!(
        manager
            .send_to_session("missing", Message::Text("x".into()))
            .await,
        0
    );
}

// ---------------------------------------------------------------------------
// Test: broadcast() and ping_all() reach everyone
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_and_ping_reach_all() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string(), Some("s".into())).await;
    let mut rx2 = manager.add("conn-2".to_string(), None).await;

    manager.broadcast(Message::Text("all".into())).await;
    manager.ping_all().await;

    for rx in [&mut rx1, &mut rx2] {
        assert!(matches!(rx.recv().await, Some(Message::Text(_))));
        assert!(matches!(rx.recv().await, Some(Message::Ping(_))));
    }
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), None).await;
    let mut rx2 = manager.add("conn-2".to_string(), Some("s".into())).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(matches!(rx1.recv().await, Some(Message::Close(None))));
    assert!(matches!(rx2.recv().await, Some(Message::Close(None))));
}
