//! UseCase テスト用の共通フィクスチャ

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use tokio::sync::mpsc;
use tsudoi_shared::time::Clock;

use crate::{
    domain::{ClientRegistry, ConnectionId, MessagePusher},
    infrastructure::{
        dto::websocket::OutboundEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryClientRegistry,
    },
};

use super::{
    ConnectClientUseCase, DisconnectClientUseCase, JoinUseCase, SendMessageUseCase,
    SetTypingUseCase, SharedSequencer, shared_sequencer,
};

/// 2023-01-01T00:00:00.000Z
pub const FIXED_NOW: i64 = 1672531200000;

/// 呼び出すたびに 1ms 進む時計（参加順を決定的にするため）
pub struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            next: AtomicI64::new(millis),
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// 実物の Registry と MessagePusher を組み合わせたテスト環境
pub struct Harness {
    pub registry: Arc<InMemoryClientRegistry>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub sequencer: SharedSequencer,
    pub clock: Arc<dyn Clock>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryClientRegistry::new()),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            sequencer: shared_sequencer(),
            clock: Arc::new(SteppingClock::starting_at(FIXED_NOW)),
        }
    }

    fn registry(&self) -> Arc<dyn ClientRegistry> {
        self.registry.clone()
    }

    fn pusher(&self) -> Arc<dyn MessagePusher> {
        self.message_pusher.clone()
    }

    pub fn connect_usecase(&self) -> ConnectClientUseCase {
        ConnectClientUseCase::new(self.pusher())
    }

    pub fn join_usecase(&self) -> JoinUseCase {
        JoinUseCase::new(
            self.registry(),
            self.pusher(),
            self.sequencer.clone(),
            self.clock.clone(),
        )
    }

    pub fn send_message_usecase(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(
            self.registry(),
            self.pusher(),
            self.sequencer.clone(),
            self.clock.clone(),
        )
    }

    pub fn set_typing_usecase(&self) -> SetTypingUseCase {
        SetTypingUseCase::new(self.registry(), self.pusher(), self.sequencer.clone())
    }

    pub fn disconnect_usecase(&self) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(
            self.registry(),
            self.pusher(),
            self.sequencer.clone(),
            self.clock.clone(),
        )
    }

    /// 接続を確立し、送信キューの受信側を返す
    pub async fn connect(&self) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(64);
        let id = self.connect_usecase().execute(tx).await;
        (id, rx)
    }

    /// 接続して join まで済ませ、join 時に受け取ったイベントは読み捨てる
    pub async fn joined(&self, name: &str) -> (ConnectionId, mpsc::Receiver<String>) {
        let (id, mut rx) = self.connect().await;
        self.join_usecase()
            .execute(&id, name.to_string())
            .await
            .expect("join should succeed");
        drain(&mut rx);
        (id, rx)
    }
}

/// キューに溜まっているイベントを全て取り出す
pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<OutboundEvent> {
    let mut events = Vec::new();
    while let Ok(json) = rx.try_recv() {
        events.push(OutboundEvent::from_json(&json).expect("outbound event should parse"));
    }
    events
}

/// users_list イベントからユーザー名一覧を取り出す
pub fn usernames(event: &OutboundEvent) -> Vec<String> {
    match event {
        OutboundEvent::UsersList(users) => users.iter().map(|u| u.username.clone()).collect(),
        other => panic!("expected users_list, got {:?}", other),
    }
}
