//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - Registry からの削除、送信キューの登録解除、退室通知と一覧のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 残りのクライアントに user_left → users_list の順で届くことを保証
//! - join していない接続の切断では何もブロードキャストしないことを確認
//! - 同じ接続を 2 回切断しても安全であることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みクライアントの切断
//! - エッジケース：未 join の接続の切断、最後のクライアントの切断、二重切断

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::{
    domain::{Client, ClientRegistry, ConnectionId, MessagePusher, PresenceEvent, Timestamp},
    infrastructure::dto::websocket::OutboundEvent,
};

use super::{SharedSequencer, fanout::publish};

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn ClientRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: SharedSequencer,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
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

    /// 切断を実行
    ///
    /// 1. Registry から削除
    /// 2. MessagePusher から送信キューを登録解除
    /// 3. join 済みだった場合のみ、残りの全員に `user_left` → `users_list` をブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Some(Client)` - join 済みだったクライアント
    /// * `None` - 未 join、または既に切断済み
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Client> {
        let _order = self.sequencer.lock().await;

        let removed = self.registry.remove(connection_id).await;
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        let Some(client) = removed else {
            tracing::info!("Connection '{}' closed before joining", connection_id);
            return None;
        };

        let roster = self.registry.snapshot().await;
        let remaining: Vec<ConnectionId> = roster.iter().map(|c| c.id.clone()).collect();

        let left = PresenceEvent::left(
            client.display_name.clone(),
            Timestamp::new(self.clock.now_millis()),
        );
        publish(
            self.message_pusher.as_ref(),
            &remaining,
            &OutboundEvent::from(&left),
        )
        .await;
        publish(
            self.message_pusher.as_ref(),
            &remaining,
            &OutboundEvent::users_list(&roster),
        )
        .await;

        tracing::info!(
            "'{}' left the chat ({} client(s) remaining)",
            client.display_name,
            remaining.len()
        );

        Some(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Harness, drain, usernames};

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_clients() {
        // テスト項目: 切断すると残りの全員に user_left → users_list が届く
        // given (前提条件):
        let harness = Harness::new();
        let (alice, mut alice_rx) = harness.joined("alice").await;
        let (_bob, mut bob_rx) = harness.joined("bob").await;
        drain(&mut alice_rx);

        // when (操作):
        let removed = harness.disconnect_usecase().execute(&alice).await;

        // then (期待する結果):
        assert_eq!(removed.unwrap().display_name.as_str(), "alice");
        let events = drain(&mut bob_rx);
        assert_eq!(events.len(), 2);
        match &events[0] {
            OutboundEvent::UserLeft(payload) => {
                assert_eq!(payload.username, "alice");
                assert_eq!(payload.message, "alice left the chat");
            }
            other => panic!("expected user_left, got {:?}", other),
        }
        assert_eq!(usernames(&events[1]), vec!["bob"]);
        assert_eq!(harness.registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnected_queue_is_unregistered() {
        // テスト項目: 切断後はそのキューに何も届かない
        // given (前提条件):
        let harness = Harness::new();
        let (alice, mut alice_rx) = harness.joined("alice").await;
        let (bob, _bob_rx) = harness.joined("bob").await;
        drain(&mut alice_rx);

        // when (操作):
        harness.disconnect_usecase().execute(&alice).await;
        harness
            .send_message_usecase()
            .execute(&bob, "still here?".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(drain(&mut alice_rx).is_empty());
        let report = harness.message_pusher.broadcast(&[alice], "x").await;
        assert_eq!(report.dropped, 1);
    }

    #[tokio::test]
    async fn test_disconnect_before_join_is_silent() {
        // テスト項目: 未 join の接続が切断しても何もブロードキャストされない
        // given (前提条件):
        let harness = Harness::new();
        let (_alice, mut alice_rx) = harness.joined("alice").await;
        let (lurker, _lurker_rx) = harness.connect().await;

        // when (操作):
        let removed = harness.disconnect_usecase().execute(&lurker).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert!(drain(&mut alice_rx).is_empty());
        let report = harness.message_pusher.broadcast(&[lurker], "x").await;
        assert_eq!(report.dropped, 1);
    }

    #[tokio::test]
    async fn test_last_client_disconnect() {
        // テスト項目: 最後のクライアントが切断すると Registry は空になる
        let harness = Harness::new();
        let (alice, _alice_rx) = harness.joined("alice").await;

        let removed = harness.disconnect_usecase().execute(&alice).await;

        assert!(removed.is_some());
        assert_eq!(harness.registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_double_disconnect_is_noop() {
        // テスト項目: 同じ接続を 2 回切断しても 2 回目は何もしない
        // given (前提条件):
        let harness = Harness::new();
        let (alice, _alice_rx) = harness.joined("alice").await;
        let (_bob, mut bob_rx) = harness.joined("bob").await;
        let usecase = harness.disconnect_usecase();
        usecase.execute(&alice).await;
        drain(&mut bob_rx);

        // when (操作):
        let second = usecase.execute(&alice).await;

        // then (期待する結果):
        assert!(second.is_none());
        assert!(drain(&mut bob_rx).is_empty());
    }
}
