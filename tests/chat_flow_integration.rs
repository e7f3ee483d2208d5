//! Integration tests for the presence/broadcast core.
//!
//! These tests drive the same dispatch path the WebSocket boundary uses,
//! wired against the in-memory presence registry and the real topic hub,
//! and verify the end-to-end flows:
//! 1. join mutates the registry, announces on the messages topic, and
//!    snapshots the full online set on the presence topic
//! 2. sendMessage re-broadcasts verbatim with no registry mutation
//! 3. transport disconnect without a leave removes the bound user and
//!    produces exactly one presence broadcast
//! 4. a failing registry drops the event without emitting broadcasts

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

use chatpp_backend::adapters::websocket::{dispatch, ClientEvent, SessionBinding};
use chatpp_backend::adapters::{InMemoryPresenceRegistry, TopicHub};
use chatpp_backend::application::handlers::chat::ChatHandlers;
use chatpp_backend::domain::{
    ChatMessage, JoinMessage, LeaveMessage, MessageKind, SYSTEM_SENDER,
};
use chatpp_backend::ports::{PresenceError, PresenceRegistry};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Registry whose store is permanently unreachable.
struct UnavailableRegistry;

#[async_trait]
impl PresenceRegistry for UnavailableRegistry {
    async fn add(&self, _username: &str) -> Result<(), PresenceError> {
        Err(PresenceError::Unavailable("connection refused".to_string()))
    }

    async fn remove(&self, _username: &str) -> Result<(), PresenceError> {
        Err(PresenceError::Unavailable("connection refused".to_string()))
    }

    async fn list(&self) -> Result<BTreeSet<String>, PresenceError> {
        Err(PresenceError::Unavailable("connection refused".to_string()))
    }
}

struct TestApp {
    handlers: Arc<ChatHandlers>,
    registry: Arc<InMemoryPresenceRegistry>,
    hub: Arc<TopicHub>,
}

fn test_app() -> TestApp {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    let hub = Arc::new(TopicHub::with_default_capacity());
    let handlers = Arc::new(ChatHandlers::new(registry.clone(), hub.clone()));
    TestApp {
        handlers,
        registry,
        hub,
    }
}

fn join_event(username: &str) -> ClientEvent {
    ClientEvent::Join(JoinMessage {
        username: username.to_string(),
    })
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn join_produces_announcement_then_snapshot() {
    let app = test_app();
    let mut messages_rx = app.hub.subscribe_messages();
    let mut presence_rx = app.hub.subscribe_presence();
    let binding = SessionBinding::default();

    dispatch(&app.handlers, &binding, join_event("carol")).await;

    // (a) system JOIN on the messages topic
    let announcement = messages_rx.recv().await.unwrap();
    assert_eq!(announcement.sender, SYSTEM_SENDER);
    assert_eq!(announcement.kind, MessageKind::Join);

    // (b) full online set, already containing the joiner
    let snapshot = presence_rx.recv().await.unwrap();
    assert_eq!(snapshot, BTreeSet::from(["carol".to_string()]));

    // and nothing else
    assert!(messages_rx.try_recv().is_err());
    assert!(presence_rx.try_recv().is_err());
}

#[tokio::test]
async fn send_message_rebroadcasts_verbatim_without_registry_mutation() {
    let app = test_app();
    let mut messages_rx = app.hub.subscribe_messages();
    let binding = SessionBinding::default();

    let message = ChatMessage {
        sender: "dave".to_string(),
        content: "hi".to_string(),
        kind: MessageKind::Chat,
    };
    dispatch(
        &app.handlers,
        &binding,
        ClientEvent::SendMessage(message.clone()),
    )
    .await;

    assert_eq!(messages_rx.recv().await.unwrap(), message);
    assert!(app.registry.is_empty().await);
}

#[tokio::test]
async fn disconnect_without_leave_cleans_up_bound_user() {
    let app = test_app();
    let binding = SessionBinding::default();

    // bob joins and binds on this session
    dispatch(&app.handlers, &binding, join_event("bob")).await;
    assert!(app.registry.list().await.unwrap().contains("bob"));

    let mut presence_rx = app.hub.subscribe_presence();

    // transport disconnect, no leave event ever arrives
    app.handlers
        .disconnect
        .execute(binding.bound().as_deref())
        .await
        .unwrap();

    assert!(!app.registry.list().await.unwrap().contains("bob"));

    // exactly one presence broadcast with the reduced set
    let snapshot = presence_rx.recv().await.unwrap();
    assert!(!snapshot.contains("bob"));
    assert!(presence_rx.try_recv().is_err());
}

#[tokio::test]
async fn disconnect_of_unbound_session_produces_nothing() {
    let app = test_app();
    let binding = SessionBinding::default();
    let mut presence_rx = app.hub.subscribe_presence();

    // connected, never joined
    app.handlers
        .disconnect
        .execute(binding.bound().as_deref())
        .await
        .unwrap();

    assert!(presence_rx.try_recv().is_err());
}

#[tokio::test]
async fn leave_then_disconnect_converges_on_removal() {
    let app = test_app();
    let binding = SessionBinding::default();

    dispatch(&app.handlers, &binding, join_event("erin")).await;
    dispatch(
        &app.handlers,
        &binding,
        ClientEvent::Leave(LeaveMessage {
            username: "erin".to_string(),
        }),
    )
    .await;

    // Disconnect fires afterwards for the same user; remove is idempotent.
    app.handlers
        .disconnect
        .execute(binding.bound().as_deref())
        .await
        .unwrap();

    assert!(app.registry.is_empty().await);
}

#[tokio::test]
async fn two_sessions_see_each_others_traffic() {
    let app = test_app();

    let alice_binding = SessionBinding::default();
    dispatch(&app.handlers, &alice_binding, join_event("alice")).await;

    // bob's session subscribes after alice is already online
    let mut bob_messages = app.hub.subscribe_messages();
    let mut bob_presence = app.hub.subscribe_presence();
    let bob_binding = SessionBinding::default();
    dispatch(&app.handlers, &bob_binding, join_event("bob")).await;

    // bob receives his own join announcement and a snapshot with both users
    assert_eq!(bob_messages.recv().await.unwrap().kind, MessageKind::Join);
    let snapshot = bob_presence.recv().await.unwrap();
    assert_eq!(
        snapshot,
        BTreeSet::from(["alice".to_string(), "bob".to_string()])
    );

    // alice chats; bob gets the verbatim message
    dispatch(
        &app.handlers,
        &alice_binding,
        ClientEvent::SendMessage(ChatMessage {
            sender: "alice".to_string(),
            content: "hello bob".to_string(),
            kind: MessageKind::Chat,
        }),
    )
    .await;
    assert_eq!(bob_messages.recv().await.unwrap().content, "hello bob");
}

#[tokio::test]
async fn unavailable_store_drops_event_without_broadcast() {
    let registry: Arc<dyn PresenceRegistry> = Arc::new(UnavailableRegistry);
    let hub = Arc::new(TopicHub::with_default_capacity());
    let handlers = Arc::new(ChatHandlers::new(registry, hub.clone()));
    let mut messages_rx = hub.subscribe_messages();
    let mut presence_rx = hub.subscribe_presence();
    let binding = SessionBinding::default();

    // The dispatch boundary swallows the failure; no broadcast escapes
    // because the registry mutation happens-before any publish.
    dispatch(&handlers, &binding, join_event("carol")).await;

    assert!(messages_rx.try_recv().is_err());
    assert!(presence_rx.try_recv().is_err());
}

#[tokio::test]
async fn unavailable_store_on_disconnect_is_survivable() {
    let registry: Arc<dyn PresenceRegistry> = Arc::new(UnavailableRegistry);
    let hub = Arc::new(TopicHub::with_default_capacity());
    let handlers = Arc::new(ChatHandlers::new(registry, hub));

    let result = handlers.disconnect.execute(Some("bob")).await;
    assert!(matches!(result, Err(PresenceError::Unavailable(_))));
}
