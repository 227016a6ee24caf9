//! Shared state of the relay handlers.

use std::sync::Arc;

use crate::{
    config::RelayConfig,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, JoinUseCase, ListClientsUseCase,
        SendMessageUseCase, SetTypingUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// JoinUseCase（join のユースケース）
    pub join_usecase: Arc<JoinUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// SetTypingUseCase（タイピング状態更新のユースケース）
    pub set_typing_usecase: Arc<SetTypingUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// ListClientsUseCase（クライアント一覧取得のユースケース）
    pub list_clients_usecase: Arc<ListClientsUseCase>,
    pub config: RelayConfig,
}
