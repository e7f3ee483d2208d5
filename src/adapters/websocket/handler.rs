//! WebSocket upgrade handler and per-connection session loop.
//!
//! Connection lifecycle, per session:
//! 1. HTTP → WebSocket upgrade; assign a client ID, subscribe to both topics
//! 2. `CONNECTED` with no binding; first `join` event binds a username
//! 3. Forward topic broadcasts out / dispatch inbound events until the
//!    socket closes
//! 4. On disconnect, drop the bound username from the presence registry and
//!    broadcast the reduced set (exactly once; no-op if never bound)

use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use uuid::Uuid;

use crate::adapters::broadcast::TopicHub;
use crate::application::handlers::chat::ChatHandlers;

use super::messages::{ClientEvent, ServerEvent};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WsState {
    /// Chat event handlers (message router + lifecycle).
    pub handlers: Arc<ChatHandlers>,
    /// Broadcast transport the session subscribes to.
    pub hub: Arc<TopicHub>,
}

impl WsState {
    /// Create a new WebSocket state.
    pub fn new(handlers: Arc<ChatHandlers>, hub: Arc<TopicHub>) -> Self {
        Self { handlers, hub }
    }
}

/// Per-connection session state: the username bound by the first `join`.
///
/// Set once; later `join` events on the same session update the registry but
/// do not rebind. Shared between the receive loop (writer) and the
/// disconnect path (reader).
#[derive(Debug, Default)]
pub struct SessionBinding(Mutex<Option<String>>);

impl SessionBinding {
    /// Bind a username if this session has none yet.
    pub fn bind_once(&self, username: &str) {
        let mut bound = self.0.lock().expect("session binding lock poisoned");
        if bound.is_none() {
            *bound = Some(username.to_string());
        }
    }

    /// The bound username, if any.
    pub fn bound(&self) -> Option<String> {
        self.0.lock().expect("session binding lock poisoned").clone()
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WsState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one connection from upgrade to close.
async fn handle_socket(socket: WebSocket, state: WsState) {
    let (mut sender, mut receiver) = socket.split();
    let client_id = Uuid::new_v4();
    tracing::debug!(%client_id, "websocket connected");

    let mut messages_rx = state.hub.subscribe_messages();
    let mut presence_rx = state.hub.subscribe_presence();
    let binding = Arc::new(SessionBinding::default());

    // Forward both topic subscriptions to this client.
    let mut send_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                msg = messages_rx.recv() => match msg {
                    Ok(m) => ServerEvent::Message(m),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%client_id, skipped = n, "slow consumer lagged on messages topic");
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                },
                snapshot = presence_rx.recv() => match snapshot {
                    Ok(s) => ServerEvent::OnlineUsers(s),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%client_id, skipped = n, "slow consumer lagged on presence topic");
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                },
            };
            if let Err(e) = send_frame(&mut sender, &frame).await {
                tracing::debug!(%client_id, "send error, closing connection: {}", e);
                break;
            }
        }
    });

    // Dispatch inbound events until the socket closes.
    let mut recv_task = {
        let handlers = Arc::clone(&state.handlers);
        let binding = Arc::clone(&binding);
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => dispatch(&handlers, &binding, event).await,
                        Err(e) => {
                            // Malformed frames die here, before the router.
                            tracing::debug!(%client_id, "dropping malformed frame: {}", e);
                        }
                    },
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(%client_id, "received unsupported binary message");
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // Protocol-level keepalive, handled by axum.
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(%client_id, "client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(%client_id, "receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    // Whichever side finishes first tears down the other.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // Single disconnect path: runs exactly once per connection.
    if let Err(e) = state.handlers.disconnect.execute(binding.bound().as_deref()).await {
        tracing::warn!(%client_id, "presence cleanup failed on disconnect: {}", e);
    }
    tracing::debug!(%client_id, "websocket closed");
}

/// Route one inbound event to its handler.
///
/// Handler failures are logged and swallowed here: the protocol has no ack
/// channel, so the emitting client never sees them.
pub async fn dispatch(handlers: &ChatHandlers, binding: &SessionBinding, event: ClientEvent) {
    match event {
        ClientEvent::SendMessage(message) => {
            handlers.send_message.execute(message).await;
        }
        ClientEvent::Join(msg) => {
            binding.bind_once(&msg.username);
            if let Err(e) = handlers.join.execute(msg).await {
                tracing::warn!("join dropped: {}", e);
            }
        }
        ClientEvent::Leave(msg) => {
            if let Err(e) = handlers.leave.execute(msg).await {
                tracing::warn!("leave dropped: {}", e);
            }
        }
    }
}

/// Send a JSON frame over the WebSocket.
async fn send_frame(
    sender: &mut SplitSink<WebSocket, Message>,
    frame: &ServerEvent,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(frame).expect("ServerEvent serialization should not fail");
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
///
/// # Example
///
/// ```ignore
/// let app = websocket_router().with_state(ws_state);
/// ```
pub fn websocket_router() -> axum::Router<WsState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
