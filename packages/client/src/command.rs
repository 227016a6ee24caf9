//! Parsing of input lines into relay events.

use tsudoi_server::infrastructure::dto::websocket::{
    InboundEvent, SendMessagePayload, TypingPayload,
};

pub const TYPING_USAGE: &str = "usage: /typing on|off";

/// Result of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Send this event to the relay
    Event(InboundEvent),
    /// Malformed command; show this hint
    Usage(&'static str),
    /// Nothing to send
    Empty,
}

/// Parse one line typed by the user
///
/// `/typing on` and `/typing off` update the typing indicator; anything else is
/// sent as a chat message.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Empty;
    }

    let mut words = line.split_whitespace();
    if words.next() == Some("/typing") {
        return match (words.next(), words.next()) {
            (Some("on"), None) => ParsedLine::Event(typing(true)),
            (Some("off"), None) => ParsedLine::Event(typing(false)),
            _ => ParsedLine::Usage(TYPING_USAGE),
        };
    }

    ParsedLine::Event(InboundEvent::SendMessage(SendMessagePayload {
        message: line.to_string(),
    }))
}

fn typing(is_typing: bool) -> InboundEvent {
    InboundEvent::Typing(TypingPayload { is_typing })
}
