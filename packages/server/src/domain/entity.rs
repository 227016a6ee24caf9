//! Core domain models for the presence relay.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, DisplayName, EventId, MessageBody, Timestamp};

/// A connection that has completed the join handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Connection this client is bound to
    pub id: ConnectionId,
    /// Name shown to other clients (not unique)
    pub display_name: DisplayName,
    /// Timestamp of the (latest) join
    pub joined_at: Timestamp,
}

impl Client {
    pub fn new(id: ConnectionId, display_name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            id,
            display_name,
            joined_at,
        }
    }
}

/// Sort clients into the order used for every client list sent on the wire.
///
/// Ordered by join time, ties broken by connection id, so that all recipients
/// of the same snapshot see the same list.
pub fn sort_roster(clients: &mut [Client]) {
    clients.sort_by(|a, b| {
        a.joined_at
            .cmp(&b.joined_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// A chat message accepted by the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub id: EventId,
    pub display_name: DisplayName,
    pub body: MessageBody,
    pub timestamp: Timestamp,
}

impl ChatEvent {
    pub fn new(
        id: EventId,
        display_name: DisplayName,
        body: MessageBody,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name,
            body,
            timestamp,
        }
    }
}

/// Kind of presence change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceKind {
    Joined,
    Left,
}

/// Notification that a client joined or left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEvent {
    pub kind: PresenceKind,
    pub display_name: DisplayName,
    pub timestamp: Timestamp,
}

impl PresenceEvent {
    pub fn joined(display_name: DisplayName, timestamp: Timestamp) -> Self {
        Self {
            kind: PresenceKind::Joined,
            display_name,
            timestamp,
        }
    }

    pub fn left(display_name: DisplayName, timestamp: Timestamp) -> Self {
        Self {
            kind: PresenceKind::Left,
            display_name,
            timestamp,
        }
    }

    /// Human-readable system line, e.g. `alice joined the chat`
    pub fn system_message(&self) -> String {
        match self.kind {
            PresenceKind::Joined => format!("{} joined the chat", self.display_name),
            PresenceKind::Left => format!("{} left the chat", self.display_name),
        }
    }
}

/// Latest typing indicator of a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingState {
    pub display_name: DisplayName,
    pub is_typing: bool,
}

impl TypingState {
    pub fn new(display_name: DisplayName, is_typing: bool) -> Self {
        Self {
            display_name,
            is_typing,
        }
    }
}
