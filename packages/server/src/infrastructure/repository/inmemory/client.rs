//! InMemory Client Registry 実装
//!
//! ドメイン層が定義する ClientRegistry trait の具体的な実装。
//! 単一の Mutex で守られた HashMap をプロセス全体の登録簿として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Client, ClientRegistry, ConnectionId, sort_roster};

/// インメモリ Client Registry 実装
///
/// 挿入・削除・スナップショット取得は全て同じロックを取るため互いに排他的。
#[derive(Default)]
pub struct InMemoryClientRegistry {
    /// ConnectionId → Client
    clients: Mutex<HashMap<ConnectionId, Client>>,
}

impl InMemoryClientRegistry {
    /// 新しい空の InMemoryClientRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn upsert(&self, client: Client) -> Option<Client> {
        let mut clients = self.clients.lock().await;
        clients.insert(client.id.clone(), client)
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Client> {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id)
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<Client> {
        let clients = self.clients.lock().await;
        clients.get(connection_id).cloned()
    }

    async fn snapshot(&self) -> Vec<Client> {
        let mut snapshot: Vec<Client> = {
            let clients = self.clients.lock().await;
            clients.values().cloned().collect()
        };
        sort_roster(&mut snapshot);
        snapshot
    }

    async fn count(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }
}
