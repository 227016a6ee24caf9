//! WebSocket client session management.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};
use tsudoi_server::infrastructure::dto::websocket::{InboundEvent, OutboundEvent};

use crate::{
    command::{ParsedLine, parse_line},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Run one WebSocket session: connect, join as `username`, then relay input lines
/// until the input closes (`Ok`) or the connection fails (`Err`).
pub async fn run_client_session(
    url: &str,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, read) = ws_stream.split();
    send_event(&mut write, &InboundEvent::UserJoin(username.to_string())).await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. `/typing on|off` toggles the typing indicator. Press Ctrl+C to exit.\n",
        username
    );

    let mut read_task = tokio::spawn(read_loop(read, username.to_string()));

    // If any one of the sides completes, stop the other
    let outcome = tokio::select! {
        read_result = &mut read_task => {
            let reason = read_result.unwrap_or_else(|e| format!("reader task failed: {}", e));
            Err(ClientError::ConnectionLost(reason))
        }
        write_result = write_loop(&mut write, input_rx, username) => {
            read_task.abort();
            write_result
        }
    };

    if outcome.is_ok() {
        let _ = write.close().await;
    }
    outcome
}

/// Render every event received from the relay. Returns why the connection ended.
async fn read_loop(mut read: SplitStream<WsStream>, username: String) -> String {
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let formatted = match OutboundEvent::from_json(text.as_str()) {
                    Ok(event) => MessageFormatter::format_event(&event, &username),
                    Err(e) => {
                        tracing::debug!("Unrecognized event: {}", e);
                        MessageFormatter::format_raw_message(text.as_str())
                    }
                };
                print!("{}", formatted);
                redisplay_prompt(&username);
            }
            Ok(Message::Binary(data)) => {
                print!("{}", MessageFormatter::format_binary_message(data.len()));
                redisplay_prompt(&username);
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                return "closed by server".to_string();
            }
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                return e.to_string();
            }
            _ => {}
        }
    }
    "stream ended".to_string()
}

/// Send input lines until the input channel closes
async fn write_loop(
    write: &mut SplitSink<WsStream, Message>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    username: &str,
) -> Result<(), ClientError> {
    while let Some(line) = input_rx.recv().await {
        match parse_line(&line) {
            ParsedLine::Event(event) => send_event(write, &event).await?,
            ParsedLine::Usage(hint) => {
                println!("{}", hint);
                redisplay_prompt(username);
            }
            ParsedLine::Empty => {}
        }
    }
    Ok(())
}

async fn send_event(
    write: &mut SplitSink<WsStream, Message>,
    event: &InboundEvent,
) -> Result<(), ClientError> {
    let json = event
        .to_json()
        .map_err(|e| ClientError::ConnectionLost(format!("failed to encode event: {}", e)))?;
    write
        .send(Message::text(json))
        .await
        .map_err(|e| ClientError::ConnectionLost(e.to_string()))
}
