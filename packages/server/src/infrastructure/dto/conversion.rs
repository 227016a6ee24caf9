//! Conversion logic from domain entities to wire DTOs.

use tsudoi_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatEvent, Client, PresenceEvent, PresenceKind, TypingState};
use crate::infrastructure::dto::websocket as dto;

impl From<&Client> for dto::UserPayload {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.as_str().to_string(),
            username: client.display_name.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(client.joined_at.value()),
        }
    }
}

impl From<&ChatEvent> for dto::ChatMessagePayload {
    fn from(event: &ChatEvent) -> Self {
        Self {
            id: event.id.value(),
            username: event.display_name.as_str().to_string(),
            message: event.body.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(event.timestamp.value()),
        }
    }
}

impl From<&PresenceEvent> for dto::SystemMessagePayload {
    fn from(event: &PresenceEvent) -> Self {
        Self {
            username: event.display_name.as_str().to_string(),
            message: event.system_message(),
            timestamp: timestamp_to_rfc3339(event.timestamp.value()),
        }
    }
}

impl From<&TypingState> for dto::UserTypingPayload {
    fn from(state: &TypingState) -> Self {
        Self {
            username: state.display_name.as_str().to_string(),
            is_typing: state.is_typing,
        }
    }
}

// ========================================
// Domain Entity → OutboundEvent
// ========================================

impl From<&ChatEvent> for dto::OutboundEvent {
    fn from(event: &ChatEvent) -> Self {
        Self::ReceiveMessage(event.into())
    }
}

impl From<&PresenceEvent> for dto::OutboundEvent {
    fn from(event: &PresenceEvent) -> Self {
        match event.kind {
            PresenceKind::Joined => Self::UserJoined(event.into()),
            PresenceKind::Left => Self::UserLeft(event.into()),
        }
    }
}

impl From<&TypingState> for dto::OutboundEvent {
    fn from(state: &TypingState) -> Self {
        Self::UserTyping(state.into())
    }
}

impl dto::OutboundEvent {
    /// Build a `users_list` event from a registry snapshot (already in roster order)
    pub fn users_list(clients: &[Client]) -> Self {
        Self::UsersList(clients.iter().map(dto::UserPayload::from).collect())
    }
}
