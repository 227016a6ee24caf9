//! Domain layer for the presence relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod sequencer;
pub mod value_object;

pub use entity::{ChatEvent, Client, PresenceEvent, PresenceKind, TypingState, sort_roster};
pub use error::{MessagePushError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use message_pusher::{BroadcastReport, MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::ClientRegistry;
pub use sequencer::EventSequencer;
pub use value_object::{
    ConnectionId, DisplayName, EventId, MAX_DISPLAY_NAME_CHARS, MAX_MESSAGE_BODY_CHARS,
    MessageBody, Timestamp,
};
