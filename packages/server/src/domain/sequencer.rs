//! Global event ordering.
//!
//! Every use case that broadcasts holds the sequencer lock while it mutates the
//! registry, takes its snapshot and enqueues the outbound event. Enqueueing never
//! waits on a socket, so the lock is only held for in-memory work, and all
//! clients observe events in the order they acquired it.

use super::EventId;

/// Issues chat event ids and serializes broadcasts.
#[derive(Debug, Default)]
pub struct EventSequencer {
    last_id: i64,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next event id for an event accepted at `now_millis`.
    ///
    /// Ids follow the clock but never repeat or go backwards, even when two
    /// events land in the same millisecond or the clock steps back.
    pub fn next_id(&mut self, now_millis: i64) -> EventId {
        let id = now_millis.max(self.last_id + 1);
        self.last_id = id;
        EventId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_follows_clock() {
        // テスト項目: 時刻が進んでいればその時刻が ID になる
        // given (前提条件):
        let mut sequencer = EventSequencer::new();

        // when (操作):
        let first = sequencer.next_id(1000);
        let second = sequencer.next_id(2000);

        // then (期待する結果):
        assert_eq!(first.value(), 1000);
        assert_eq!(second.value(), 2000);
    }

    #[test]
    fn test_next_id_is_strictly_increasing_within_same_millisecond() {
        // テスト項目: 同一ミリ秒内の複数イベントでも ID は重複しない
        // given (前提条件):
        let mut sequencer = EventSequencer::new();

        // when (操作):
        let ids: Vec<i64> = (0..3).map(|_| sequencer.next_id(5000).value()).collect();

        // then (期待する結果):
        assert_eq!(ids, vec![5000, 5001, 5002]);
    }

    #[test]
    fn test_next_id_survives_clock_going_backwards() {
        // テスト項目: 時計が巻き戻っても ID は減少しない
        // given (前提条件):
        let mut sequencer = EventSequencer::new();
        sequencer.next_id(9000);

        // when (操作):
        let id = sequencer.next_id(100);

        // then (期待する結果):
        assert_eq!(id.value(), 9001);
    }
}
