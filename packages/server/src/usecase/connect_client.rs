//! UseCase: 接続処理
//!
//! トランスポート層の接続に ConnectionId を割り当て、送信キューを MessagePusher に
//! 登録します。この時点ではまだ Registry には載りません（接続済み・未 join）。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

/// 接続のユースケース
pub struct ConnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - この接続への送信キュー
    ///
    /// # Returns
    ///
    /// 新しく割り当てた ConnectionId
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_connection(connection_id.clone(), sender)
            .await;
        tracing::info!("Connection '{}' opened", connection_id);
        connection_id
    }
}
