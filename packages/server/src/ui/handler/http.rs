//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{
        http::{HealthDto, RootDto},
        websocket::UserPayload,
    },
    ui::state::AppState,
};

/// Liveness banner
pub async fn root() -> Json<RootDto> {
    Json(RootDto {
        message: "Real-time Chat Server is running!".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        clients: state.list_clients_usecase.count().await,
    })
}

/// Current client list, in the same shape and order as `users_list`
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<UserPayload>> {
    let clients = state.list_clients_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(clients.iter().map(UserPayload::from).collect())
}
