//! Repository trait 定義
//!
//! ドメイン層が必要とするクライアント登録簿（Registry）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{Client, ConnectionId};

/// Client Registry trait
///
/// join 済みクライアントを `ConnectionId` で管理するプロセス全体の登録簿。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// 全ての操作は互いに排他的に実行されなければならない。
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// クライアントを登録（同じ ConnectionId が既にあれば上書き）
    ///
    /// 上書きされた以前のエントリを返す
    async fn upsert(&self, client: Client) -> Option<Client>;

    /// クライアントを削除し、削除されたエントリを返す
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Client>;

    /// ConnectionId に対応するクライアントを取得
    async fn get(&self, connection_id: &ConnectionId) -> Option<Client>;

    /// 登録中の全クライアントのスナップショットを取得（一覧表示順にソート済み）
    async fn snapshot(&self) -> Vec<Client>;

    /// 登録中のクライアント数を取得
    async fn count(&self) -> usize;
}
