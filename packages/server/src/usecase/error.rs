//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// join 処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// 表示名が空、または長すぎる
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(ValueObjectError),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 本文が空、または長すぎる
    #[error("Invalid message body: {0}")]
    InvalidBody(ValueObjectError),

    /// join していない接続からの送信
    #[error("Connection '{0}' has not joined")]
    NotJoined(String),
}

/// タイピング状態更新のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetTypingError {
    /// join していない接続からの更新
    #[error("Connection '{0}' has not joined")]
    NotJoined(String),
}
