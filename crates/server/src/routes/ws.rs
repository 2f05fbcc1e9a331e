use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
    Extension,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::routes::auth::ServerState;
use service::auth::domain::Claims;
use service::notify::OrderEvent;

/// Upgrade to a WebSocket carrying order events addressed to the
/// authenticated user (as customer or provider).
pub async fn notifications(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    ws: WebSocketUpgrade,
) -> Response {
    let rx = state.hub.subscribe();
    let user_id = claims.uid;
    ws.on_upgrade(move |socket| push_events(socket, rx, user_id))
}

async fn push_events(
    mut socket: WebSocket,
    mut rx: broadcast::Receiver<OrderEvent>,
    user_id: i32,
) {
    debug!(user_id, "notification channel opened");
    loop {
        tokio::select! {
            incoming = socket.recv() => {
                // Clients only listen; any close or error ends the stream.
                match incoming {
                    None | Some(Err(_)) => break,
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(_)) => {}
                }
            }
            event = rx.recv() => {
                match event {
                    Ok(ev) if ev.concerns(user_id) => {
                        let payload = match serde_json::to_string(&ev) {
                            Ok(p) => p,
                            Err(e) => {
                                warn!(error = %e, "failed to serialize order event");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(user_id, skipped = n, "notification receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
    debug!(user_id, "notification channel closed");
}
