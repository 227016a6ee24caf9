//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（容量付き `mpsc::Sender`）を管理
//! - クライアントへのイベント送信（broadcast）
//!
//! ## 設計ノート
//!
//! キューの生成とソケットへの書き出しは UI 層（`ui/handler/websocket.rs`）が行います。
//! この実装はキューへ `try_send` するだけなので、遅いクライアントがいても
//! 他のクライアントへの配信は止まりません。キューが満杯の宛先ではイベントを破棄します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{BroadcastReport, ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = tokio::sync::mpsc::channel(256);
/// pusher.register_connection(connection_id.clone(), tx).await;
/// let report = pusher.broadcast(&[connection_id], "{\"event\":\"users_list\",\"payload\":[]}").await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

/// 1 つのキューへノンブロッキングで積む
fn enqueue(
    connection_id: &ConnectionId,
    sender: &PusherChannel,
    content: &str,
) -> Result<(), MessagePushError> {
    sender
        .try_send(content.to_string())
        .map_err(|e| match e {
            TrySendError::Full(_) => MessagePushError::QueueFull(connection_id.to_string()),
            TrySendError::Closed(_) => MessagePushError::ChannelClosed(connection_id.to_string()),
        })
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        connections.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(connection_id).is_some();
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
        removed
    }

    async fn broadcast(&self, targets: &[ConnectionId], content: &str) -> BroadcastReport {
        let connections = self.connections.lock().await;
        let mut report = BroadcastReport::default();

        for target in targets {
            let result = match connections.get(target) {
                Some(sender) => enqueue(target, sender, content),
                None => Err(MessagePushError::ConnectionNotFound(target.to_string())),
            };

            // ブロードキャストでは一部の送信失敗を許容
            match result {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::debug!("Broadcasted event to connection '{}'", target);
                }
                Err(e) => {
                    report.dropped += 1;
                    tracing::warn!("Dropped event for connection '{}': {}", target, e);
                }
            }
        }

        report
    }
}
