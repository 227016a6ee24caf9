//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信（通知）のインターフェース。
//! WebSocket などの具体的な転送手段は Infrastructure 層が実装します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ConnectionId;

/// 接続ごとの送信キュー（容量付き）
///
/// 受信側は UI 層の書き込みタスクが保持し、ソケットへ書き出す。
pub type PusherChannel = mpsc::Sender<String>;

/// ブロードキャスト結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// キューに積めた宛先の数
    pub delivered: usize,
    /// 破棄した宛先の数（キュー満杯・切断済み・未登録）
    pub dropped: usize,
}

/// MessagePusher trait
///
/// 送信はノンブロッキングで行い、遅いクライアントが他のクライアントへの配信を
/// 止めてはならない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信キューを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信キューを登録解除（登録されていた場合 true）
    async fn unregister_connection(&self, connection_id: &ConnectionId) -> bool;

    /// 複数の接続へ送信
    ///
    /// 一部の宛先への送信失敗は残りの宛先への送信を中断せず、エラーとしても返さない。
    async fn broadcast(&self, targets: &[ConnectionId], content: &str) -> BroadcastReport;
}
