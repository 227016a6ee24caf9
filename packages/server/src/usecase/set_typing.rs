//! UseCase: タイピング状態の更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SetTypingUseCase::execute() メソッド
//! - 送信者以外の全員への user_typing ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者本人にはエコーしないことを保証
//! - join 前の接続からの更新が無視されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：タイピング開始・終了の通知
//! - 異常系：未 join の接続
//! - エッジケース：自分しかいない場合（通知対象なし）

use std::sync::Arc;

use crate::{
    domain::{ClientRegistry, ConnectionId, MessagePusher, TypingState},
    infrastructure::dto::websocket::OutboundEvent,
};

use super::{SharedSequencer, error::SetTypingError, fanout::publish};

/// タイピング状態更新のユースケース
///
/// 状態は保持せず、最新の値をそのまま他のクライアントへ中継する。
pub struct SetTypingUseCase {
    registry: Arc<dyn ClientRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: SharedSequencer,
}

impl SetTypingUseCase {
    /// 新しい SetTypingUseCase を作成
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: SharedSequencer,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            sequencer,
        }
    }

    /// タイピング状態の更新を実行
    ///
    /// # Returns
    ///
    /// * `Ok(TypingState)` - 中継した状態
    /// * `Err(SetTypingError)` - 未 join の接続（何もブロードキャストしない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> Result<TypingState, SetTypingError> {
        let _order = self.sequencer.lock().await;

        let client = self
            .registry
            .get(connection_id)
            .await
            .ok_or_else(|| SetTypingError::NotJoined(connection_id.to_string()))?;

        let state = TypingState::new(client.display_name, is_typing);
        let others: Vec<ConnectionId> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .map(|c| c.id)
            .filter(|id| id != connection_id)
            .collect();
        publish(
            self.message_pusher.as_ref(),
            &others,
            &OutboundEvent::from(&state),
        )
        .await;

        Ok(state)
    }
}
