//! UseCase 層
//!
//! リレーの各操作（接続・join・送信・タイピング・切断・一覧取得）を実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::EventSequencer;

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
mod fanout;
pub mod join;
pub mod list_clients;
pub mod send_message;
pub mod set_typing;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{JoinError, SendMessageError, SetTypingError};
pub use join::JoinUseCase;
pub use list_clients::ListClientsUseCase;
pub use send_message::SendMessageUseCase;
pub use set_typing::SetTypingUseCase;

/// ブロードキャストを行う全 UseCase で共有するシーケンサ
pub type SharedSequencer = Arc<Mutex<EventSequencer>>;

/// 新しい共有シーケンサを作成
pub fn shared_sequencer() -> SharedSequencer {
    Arc::new(Mutex::new(EventSequencer::new()))
}
