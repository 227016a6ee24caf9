//! UseCase: join 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinUseCase::execute() メソッド
//! - Registry への登録と、入室通知・クライアント一覧のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - join した本人には入室通知を送らず、一覧だけを送ることを保証
//! - 同じ接続で再度 join した場合に上書きされることを確認
//! - 同名のクライアントが両方受け入れられることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目・2 人目の join
//! - 異常系：空の表示名
//! - エッジケース：同一接続での再 join、同名クライアント

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::{
    domain::{
        Client, ClientRegistry, ConnectionId, DisplayName, MessagePusher, PresenceEvent,
        Timestamp,
    },
    infrastructure::dto::websocket::OutboundEvent,
};

use super::{SharedSequencer, error::JoinError, fanout::publish};

/// join のユースケース
pub struct JoinUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn ClientRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// ブロードキャスト順序の直列化
    sequencer: SharedSequencer,
    clock: Arc<dyn Clock>,
}

impl JoinUseCase {
    /// 新しい JoinUseCase を作成
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

    /// join を実行
    ///
    /// 1. 表示名を検証（前後の空白を除去、空は拒否）
    /// 2. Registry に登録（同じ接続なら上書き）
    /// 3. 自分以外の全員に `user_joined` をブロードキャスト
    /// 4. 自分を含む全員に `users_list` をブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `connection_id` - join する接続
    /// * `display_name` - クライアントから受け取った表示名（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(Client)` - 登録されたクライアント
    /// * `Err(JoinError)` - 表示名が不正（何もブロードキャストしない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        display_name: String,
    ) -> Result<Client, JoinError> {
        let display_name = DisplayName::new(display_name).map_err(JoinError::InvalidDisplayName)?;

        let _order = self.sequencer.lock().await;

        let joined_at = Timestamp::new(self.clock.now_millis());
        let client = Client::new(connection_id.clone(), display_name.clone(), joined_at);
        if let Some(previous) = self.registry.upsert(client.clone()).await {
            tracing::info!(
                "Connection '{}' re-joined: '{}' -> '{}'",
                connection_id,
                previous.display_name,
                display_name
            );
        } else {
            tracing::info!("'{}' joined the chat ({})", display_name, connection_id);
        }

        let roster = self.registry.snapshot().await;
        let everyone: Vec<ConnectionId> = roster.iter().map(|c| c.id.clone()).collect();
        let others: Vec<ConnectionId> = everyone
            .iter()
            .filter(|id| *id != connection_id)
            .cloned()
            .collect();

        let joined = PresenceEvent::joined(display_name, joined_at);
        publish(
            self.message_pusher.as_ref(),
            &others,
            &OutboundEvent::from(&joined),
        )
        .await;
        publish(
            self.message_pusher.as_ref(),
            &everyone,
            &OutboundEvent::users_list(&roster),
        )
        .await;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueObjectError;
    use crate::usecase::test_support::{Harness, drain, usernames};

    #[tokio::test]
    async fn test_first_join_receives_users_list_only() {
        // テスト項目: 1 人目の join では本人に users_list=[alice] だけが届く
        // given (前提条件):
        let harness = Harness::new();
        let (alice, mut alice_rx) = harness.connect().await;

        // when (操作):
        let result = harness
            .join_usecase()
            .execute(&alice, "alice".to_string())
            .await;

        // then (期待する結果):
        let client = result.unwrap();
        assert_eq!(client.display_name.as_str(), "alice");
        let events = drain(&mut alice_rx);
        assert_eq!(events.len(), 1);
        assert_eq!(usernames(&events[0]), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_second_join_notifies_others_then_lists() {
        // テスト項目: 2 人目の join で既存参加者には user_joined → users_list、本人には users_list のみ
        // given (前提条件):
        let harness = Harness::new();
        let (_alice, mut alice_rx) = harness.joined("alice").await;
        let (bob, mut bob_rx) = harness.connect().await;

        // when (操作):
        harness
            .join_usecase()
            .execute(&bob, "bob".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        let alice_events = drain(&mut alice_rx);
        assert_eq!(alice_events.len(), 2);
        match &alice_events[0] {
            OutboundEvent::UserJoined(payload) => {
                assert_eq!(payload.username, "bob");
                assert_eq!(payload.message, "bob joined the chat");
                assert!(payload.timestamp.starts_with("2023-01-01T00:00:00."));
            }
            other => panic!("expected user_joined, got {:?}", other),
        }
        assert_eq!(usernames(&alice_events[1]), vec!["alice", "bob"]);

        let bob_events = drain(&mut bob_rx);
        assert_eq!(bob_events.len(), 1);
        assert_eq!(usernames(&bob_events[0]), vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_join_with_blank_name_is_rejected() {
        // テスト項目: 空白だけの表示名は拒否され、何もブロードキャストされない
        // given (前提条件):
        let harness = Harness::new();
        let (_alice, mut alice_rx) = harness.joined("alice").await;
        let (anon, mut anon_rx) = harness.connect().await;

        // when (操作):
        let result = harness
            .join_usecase()
            .execute(&anon, "   ".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinError::InvalidDisplayName(
                ValueObjectError::DisplayNameEmpty
            ))
        );
        assert_eq!(harness.registry.count().await, 1);
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut anon_rx).is_empty());
    }

    #[tokio::test]
    async fn test_rejoin_overwrites_and_rebroadcasts() {
        // テスト項目: 同じ接続で再 join すると表示名が上書きされ、ブロードキャストも再実行される
        // given (前提条件):
        let harness = Harness::new();
        let (_bob, mut bob_rx) = harness.joined("bob").await;
        let (alice, mut alice_rx) = harness.joined("alice").await;
        drain(&mut bob_rx);

        // when (操作):
        harness
            .join_usecase()
            .execute(&alice, "alicia".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(harness.registry.count().await, 2);
        let bob_events = drain(&mut bob_rx);
        assert_eq!(bob_events.len(), 2);
        assert!(matches!(
            &bob_events[0],
            OutboundEvent::UserJoined(p) if p.username == "alicia"
        ));
        let alice_events = drain(&mut alice_rx);
        assert_eq!(alice_events.len(), 1);
        let mut names = usernames(&alice_events[0]);
        names.sort();
        assert_eq!(names, vec!["alicia", "bob"]);
    }

    #[tokio::test]
    async fn test_duplicate_display_names_are_both_listed() {
        // テスト項目: 同名の 2 クライアントが両方受け入れられ、一覧に両方載る
        // given (前提条件):
        let harness = Harness::new();
        let (_first, _first_rx) = harness.joined("alice").await;
        let (second, mut second_rx) = harness.connect().await;

        // when (操作):
        let result = harness
            .join_usecase()
            .execute(&second, "alice".to_string())
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(harness.registry.count().await, 2);
        let events = drain(&mut second_rx);
        assert_eq!(usernames(&events[0]), vec!["alice", "alice"]);
    }
}
