//! WebSocket event DTOs for the presence relay.
//!
//! Every frame is a JSON envelope `{ "event": <tag>, "payload": <value> }`.
//! Inbound and outbound tags are closed enums; an unknown tag fails to parse.

use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Join with the given display name
    UserJoin(String),
    /// Post a chat message
    SendMessage(SendMessagePayload),
    /// Update the typing indicator
    Typing(TypingPayload),
}

impl InboundEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub is_typing: bool,
}

/// Events broadcast by the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum OutboundEvent {
    ReceiveMessage(ChatMessagePayload),
    UserJoined(SystemMessagePayload),
    UserLeft(SystemMessagePayload),
    UsersList(Vec<UserPayload>),
    UserTyping(UserTypingPayload),
}

impl OutboundEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Wire tag of this event, for logging
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ReceiveMessage(_) => "receive_message",
            Self::UserJoined(_) => "user_joined",
            Self::UserLeft(_) => "user_left",
            Self::UsersList(_) => "users_list",
            Self::UserTyping(_) => "user_typing",
        }
    }
}

/// Chat message as delivered to every joined client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub id: i64,
    pub username: String,
    pub message: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

/// Join/leave notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessagePayload {
    pub username: String,
    pub message: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

/// Entry of `users_list` and of `GET /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: String,
    pub username: String,
    /// RFC 3339 (UTC)
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypingPayload {
    pub username: String,
    pub is_typing: bool,
}
