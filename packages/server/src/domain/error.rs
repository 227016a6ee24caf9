//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// DisplayName validation error (empty after trimming)
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("DisplayName cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// MessageBody validation error (empty or whitespace only)
    #[error("MessageBody cannot be empty")]
    MessageBodyEmpty,

    /// MessageBody too long error
    #[error("MessageBody cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },
}

/// Errors raised while pushing an outbound event to a single connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// The connection is not registered with the pusher
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    /// The connection's outbound queue is full; the event was dropped
    #[error("Outbound queue for connection '{0}' is full")]
    QueueFull(String),

    /// The connection's writer has gone away
    #[error("Outbound channel for connection '{0}' is closed")]
    ChannelClosed(String),
}
