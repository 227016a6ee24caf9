//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tsudoi_shared::time::Clock;

use crate::{
    config::RelayConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryClientRegistry,
    },
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, JoinUseCase, ListClientsUseCase,
        SendMessageUseCase, SetTypingUseCase, shared_sequencer,
    },
};

use super::{
    handler::{health_check, list_users, root, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// WebSocket presence relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(RelayConfig::default(), Arc::new(SystemClock));
/// server.run("127.0.0.1", 3002).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Wire the in-memory registry and the WebSocket pusher into every use case
    ///
    /// Dependencies are created in order:
    /// 1. Registry
    /// 2. MessagePusher
    /// 3. UseCases (sharing one sequencer)
    /// 4. AppState
    pub fn in_memory(config: RelayConfig, clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(InMemoryClientRegistry::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let sequencer = shared_sequencer();

        let state = AppState {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            join_usecase: Arc::new(JoinUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                sequencer.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                sequencer.clone(),
                clock.clone(),
            )),
            set_typing_usecase: Arc::new(SetTypingUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                registry.clone(),
                message_pusher,
                sequencer,
                clock,
            )),
            list_clients_usecase: Arc::new(ListClientsUseCase::new(registry)),
            config,
        };

        Self::new(state)
    }

    /// Build the router with WebSocket and HTTP routes, CORS and request tracing
    pub fn router(&self) -> Result<Router, ServerError> {
        let origin = self
            .state
            .config
            .cors_origin
            .parse::<HeaderValue>()
            .map_err(|_| ServerError::InvalidCorsOrigin(self.state.config.cors_origin.clone()))?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST]);

        Ok(Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(root))
            .route("/api/health", get(health_check))
            .route("/api/users", get(list_users))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone()))
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }

    /// Run the relay until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the CORS origin is invalid, the address cannot be bound,
    /// or serving fails.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Presence relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsudoi_shared::time::FixedClock;

    #[test]
    fn test_invalid_cors_origin_is_rejected() {
        // テスト項目: ヘッダ値として不正な CORS オリジンはエラーになる
        // given (前提条件):
        let config = RelayConfig {
            cors_origin: "http://bad\norigin".to_string(),
            ..RelayConfig::default()
        };
        let server = Server::in_memory(config, Arc::new(FixedClock::new(0)));

        // when (操作):
        let result = server.router();

        // then (期待する結果):
        assert!(matches!(result, Err(ServerError::InvalidCorsOrigin(_))));
    }

    #[test]
    fn test_default_router_builds() {
        // テスト項目: デフォルト設定でルーターが構築できる
        let server = Server::in_memory(RelayConfig::default(), Arc::new(FixedClock::new(0)));

        assert!(server.router().is_ok());
    }
}
