// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live check-in streaming for door-station UIs.
//!
//! This module pushes read-only state change notifications over WebSocket
//! connections. Events are facts about confirmed durable writes, never
//! directives: a client that misses events can always re-query the HTTP
//! API for the authoritative projection.
//!
//! # Architecture
//!
//! - Events are broadcast to all connected clients
//! - Every event follows a confirmed durable write, in write order
//! - No commands are executed over WebSocket connections
//! - On connect, clients receive the complete durable check-in snapshot
//!   before any deltas; the roster itself is fetched over the HTTP API

use std::collections::HashMap;

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use rollcall::CheckinDelta;
use rollcall_domain::{CheckinState, ParticipantId};
use rollcall_persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live check-in event types.
///
/// These events describe changes already confirmed by the durable store.
/// They are purely informational and never the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A single participant's check-in state changed.
    CheckinUpdate {
        /// The participant's derived identity.
        participant_id: String,
        /// The new checked-in flag.
        checked_in: bool,
        /// Who performed the change (absent after an uncheck).
        checked_by: Option<String>,
        /// When the change happened (absent after an uncheck).
        checked_at: Option<String>,
    },
    /// The roster was replaced by an import, or check-ins were reset.
    RosterChanged {
        /// Number of participants in the active roster.
        total: usize,
        /// True when the change was a check-in reset.
        reset: bool,
    },
    /// Complete durable check-in snapshot (sent on initial connect).
    ///
    /// Keyed by derived identity, including check-ins for identities not on
    /// the current roster. The roster is fetched separately over HTTP.
    InitialState {
        /// Check-in state for every durably stored identity.
        checkins: HashMap<ParticipantId, CheckinState>,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

impl LiveEvent {
    /// Builds the event describing a confirmed check-in delta.
    #[must_use]
    pub fn from_delta(delta: &CheckinDelta) -> Self {
        Self::CheckinUpdate {
            participant_id: delta.participant_id.value().to_string(),
            checked_in: delta.checked_in,
            checked_by: delta.checked_by.clone(),
            checked_at: delta.checked_at.clone(),
        }
    }
}

/// Broadcaster for live check-in events.
///
/// A lightweight wrapper around `tokio::sync::broadcast` that fans
/// confirmed state changes out to every connected WebSocket client.
#[derive(Clone)]
pub struct CheckinBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<LiveEvent>,
}

impl CheckinBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    /// This is non-blocking and will not wait for clients to receive the event.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for CheckinBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles WebSocket upgrade requests for live check-in streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `state` - The application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Builds the connect-time snapshot event from the durable store.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub(crate) async fn snapshot_event(state: &AppState) -> Result<LiveEvent, PersistenceError> {
    let persistence = state.persistence.lock().await;
    Ok(LiveEvent::InitialState {
        checkins: persistence.load_checkins()?,
    })
}

/// Handles an individual WebSocket connection.
///
/// The receiver is subscribed before the snapshot is taken, so a delta
/// racing the snapshot is delivered after it rather than lost.
async fn handle_socket(socket: WebSocket, state: AppState) {
    info!("Client connected to live check-in stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = state.broadcaster.subscribe();

    // Send connection confirmation
    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: rollcall_api::now_iso8601().unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    // Send the complete durable check-in snapshot
    let snapshot: LiveEvent = match snapshot_event(&state).await {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "Failed to load check-in snapshot for connecting client");
            return;
        }
    };

    if let Ok(json) = serde_json::to_string(&snapshot)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send initial state snapshot");
        return;
    }

    // Task for sending events to the client
    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    // We don't process commands over WebSocket
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live check-in stream");
}

#[cfg(test)]
mod tests {
    use rollcall_domain::derive_participant_id;

    use super::*;

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster = CheckinBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = CheckinBroadcaster::new();
        // Should not panic when no receivers
        broadcaster.broadcast(&LiveEvent::RosterChanged {
            total: 3,
            reset: false,
        });
    }

    #[test]
    fn test_broadcast_with_receiver() {
        let broadcaster = CheckinBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::RosterChanged {
            total: 3,
            reset: false,
        });

        match rx.try_recv() {
            Ok(LiveEvent::RosterChanged {
                total: 3,
                reset: false,
            }) => {}
            other => panic!("Expected RosterChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster = CheckinBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::RosterChanged {
            total: 1,
            reset: true,
        });

        // Both receivers should get the event
        assert!(matches!(rx1.try_recv(), Ok(LiveEvent::RosterChanged { .. })));
        assert!(matches!(rx2.try_recv(), Ok(LiveEvent::RosterChanged { .. })));
    }

    #[test]
    fn test_initial_state_keys_by_identity() {
        let id = derive_participant_id("Ana", "Silva");
        let mut checkins: HashMap<ParticipantId, CheckinState> = HashMap::new();
        checkins.insert(
            id.clone(),
            CheckinState::checked(String::from("staff1"), String::from("2026-08-25T10:00:00Z")),
        );

        let json = serde_json::to_string(&LiveEvent::InitialState { checkins })
            .expect("Failed to serialize");

        assert!(json.contains("\"type\":\"initial_state\""));
        assert!(json.contains(id.value()));
    }

    #[test]
    fn test_checkin_event_serialization() {
        let delta = CheckinDelta::checked_in(
            derive_participant_id("Ana", "Silva"),
            String::from("staff1"),
            String::from("2026-08-25T10:00:00Z"),
        );
        let event = LiveEvent::from_delta(&delta);

        let json = serde_json::to_string(&event).expect("Failed to serialize");
        assert!(json.contains("\"type\":\"checkin_update\""));

        let deserialized: LiveEvent = serde_json::from_str(&json).expect("Failed to deserialize");
        match deserialized {
            LiveEvent::CheckinUpdate {
                participant_id,
                checked_in,
                checked_by,
                checked_at,
            } => {
                assert_eq!(participant_id, delta.participant_id.value());
                assert!(checked_in);
                assert_eq!(checked_by.as_deref(), Some("staff1"));
                assert_eq!(checked_at.as_deref(), Some("2026-08-25T10:00:00Z"));
            }
            _ => panic!("Wrong event type"),
        }
    }
}
