//! 送信イベントの直列化とブロードキャスト

use crate::{
    domain::{BroadcastReport, ConnectionId, MessagePusher},
    infrastructure::dto::websocket::OutboundEvent,
};

/// イベントを JSON にして宛先全員のキューへ積む
///
/// 直列化に失敗した場合は全宛先分を破棄扱いにする。
pub(super) async fn publish(
    message_pusher: &dyn MessagePusher,
    targets: &[ConnectionId],
    event: &OutboundEvent,
) -> BroadcastReport {
    let json = match event.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize '{}' event: {}", event.tag(), e);
            return BroadcastReport {
                delivered: 0,
                dropped: targets.len(),
            };
        }
    };

    let report = message_pusher.broadcast(targets, &json).await;
    tracing::debug!(
        "Published '{}' to {} connection(s) ({} dropped)",
        event.tag(),
        report.delivered,
        report.dropped
    );
    report
}
