//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::InboundEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains this connection's outbound queue into the WebSocket sink.
///
/// A write that does not complete within `write_timeout` ends the task, which
/// closes the connection.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    write_timeout: Duration,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(write_timeout, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!("Write to '{}' failed: {}", connection_id, e);
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "Write to '{}' stalled for {:?}, closing connection",
                        connection_id,
                        write_timeout
                    );
                    break;
                }
            }
        }
    })
}

/// Spawns a task that reads inbound frames and dispatches them to the use cases.
///
/// Any frame (including pings) resets the idle timer.
fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let idle_timeout = state.config.idle_timeout;
        loop {
            let next = match idle_timeout {
                Some(idle) => match tokio::time::timeout(idle, receiver.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::info!("Connection '{}' idle for {:?}, closing", connection_id, idle);
                        break;
                    }
                },
                None => receiver.next().await,
            };

            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => dispatch(&state, &connection_id, text.as_str()).await,
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

/// Route one inbound frame to its use case. Rejected input is logged and dropped.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match InboundEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        InboundEvent::UserJoin(display_name) => {
            if let Err(e) = state.join_usecase.execute(connection_id, display_name).await {
                tracing::warn!("Join from '{}' rejected: {}", connection_id, e);
            }
        }
        InboundEvent::SendMessage(payload) => {
            match state
                .send_message_usecase
                .execute(connection_id, payload.message)
                .await
            {
                Ok(_) => {}
                Err(e @ crate::usecase::SendMessageError::NotJoined(_)) => {
                    tracing::debug!("{}", e);
                }
                Err(e) => {
                    tracing::warn!("Message from '{}' rejected: {}", connection_id, e);
                }
            }
        }
        InboundEvent::Typing(payload) => {
            if let Err(e) = state
                .set_typing_usecase
                .execute(connection_id, payload.is_typing)
                .await
            {
                tracing::debug!("{}", e);
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    // Create a bounded queue for this connection's outbound events
    let (tx, rx) = mpsc::channel(state.config.outbound_buffer);
    let connection_id = state.connect_client_usecase.execute(tx).await;

    let mut send_task = pusher_loop(
        rx,
        sender,
        state.config.write_timeout,
        connection_id.clone(),
    );
    let mut recv_task = receive_loop(receiver, state.clone(), connection_id.clone());

    // If any one of the tasks completes, abort the other and wait for it to stop,
    // so a join still in flight cannot land after the disconnect below
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };

    // Transport disconnect is an implicit Disconnect
    state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
}
