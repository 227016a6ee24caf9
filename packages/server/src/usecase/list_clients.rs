//! UseCase: クライアント一覧取得（スナップショットクエリ）

use std::sync::Arc;

use crate::domain::{Client, ClientRegistry};

/// クライアント一覧取得のユースケース
pub struct ListClientsUseCase {
    registry: Arc<dyn ClientRegistry>,
}

impl ListClientsUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// join 済みクライアントを参加順で返す
    pub async fn execute(&self) -> Vec<Client> {
        self.registry.snapshot().await
    }

    /// join 済みクライアントの数
    pub async fn count(&self) -> usize {
        self.registry.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::Harness;

    #[tokio::test]
    async fn test_list_reflects_join_and_disconnect() {
        // テスト項目: 一覧は join 済みクライアントのみを参加順で返し、切断で消える
        // given (前提条件):
        let harness = Harness::new();
        let (alice, _alice_rx) = harness.joined("alice").await;
        let (_bob, _bob_rx) = harness.joined("bob").await;
        let (_lurker, _lurker_rx) = harness.connect().await;
        let usecase = ListClientsUseCase::new(harness.registry.clone());

        // when (操作):
        let before: Vec<String> = usecase
            .execute()
            .await
            .iter()
            .map(|c| c.display_name.as_str().to_string())
            .collect();
        harness.disconnect_usecase().execute(&alice).await;
        let after = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(before, vec!["alice", "bob"]);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].display_name.as_str(), "bob");
        assert_eq!(usecase.count().await, 1);
    }

    #[tokio::test]
    async fn test_empty_list() {
        // テスト項目: 誰もいない場合は空
        let harness = Harness::new();
        let usecase = ListClientsUseCase::new(harness.registry.clone());

        assert!(usecase.execute().await.is_empty());
        assert_eq!(usecase.count().await, 0);
    }
}
