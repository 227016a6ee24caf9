//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Username rejected before connecting
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was closed or failed
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
}
