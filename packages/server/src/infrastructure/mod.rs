//! Infrastructure layer: wire formats, registry storage and message delivery.

pub mod dto;
pub mod message_pusher;
pub mod repository;
