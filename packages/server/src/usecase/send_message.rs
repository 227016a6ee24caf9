//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者を含む全員へのブロードキャスト（エコーは意図的）
//!
//! ### なぜこのテストが必要か
//! - 全クライアントが同じ順序でメッセージを受け取ること（FIFO ブロードキャスト）を保証
//! - join 前の送信が誰にも届かないことを確認
//! - 一部の宛先への配信失敗が送信者にエラーとして返らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：未 join の送信者、空・長すぎる本文
//! - エッジケース：配信失敗を含むブロードキャスト

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::{
    domain::{
        ChatEvent, ClientRegistry, ConnectionId, MessageBody, MessagePusher, Timestamp,
    },
    infrastructure::dto::websocket::OutboundEvent,
};

use super::{SharedSequencer, error::SendMessageError, fanout::publish};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn ClientRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// イベント ID の採番とブロードキャスト順序の直列化
    sequencer: SharedSequencer,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: SharedSequencer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `body` - クライアントから受け取った本文（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatEvent)` - 受理されブロードキャストされたイベント
    /// * `Err(SendMessageError)` - 本文が不正、または未 join（何もブロードキャストしない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        body: String,
    ) -> Result<ChatEvent, SendMessageError> {
        let body = MessageBody::new(body).map_err(SendMessageError::InvalidBody)?;

        let mut sequencer = self.sequencer.lock().await;

        let sender = self
            .registry
            .get(connection_id)
            .await
            .ok_or_else(|| SendMessageError::NotJoined(connection_id.to_string()))?;

        let now = self.clock.now_millis();
        let event = ChatEvent::new(
            sequencer.next_id(now),
            sender.display_name,
            body,
            Timestamp::new(now),
        );

        // 送信者本人を含む全員へ
        let everyone: Vec<ConnectionId> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .map(|c| c.id)
            .collect();
        publish(
            self.message_pusher.as_ref(),
            &everyone,
            &OutboundEvent::from(&event),
        )
        .await;

        tracing::info!(
            "Message {} from '{}' broadcast to {} client(s)",
            event.id.value(),
            event.display_name,
            everyone.len()
        );

        Ok(event)
    }
}
