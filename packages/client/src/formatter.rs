//! Message formatting utilities for client display.

use tsudoi_server::infrastructure::dto::websocket::{
    ChatMessagePayload, OutboundEvent, SystemMessagePayload, UserPayload, UserTypingPayload,
};
use tsudoi_shared::time::rfc3339_to_time_of_day;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

/// `HH:MM:SS` (UTC) for relay timestamps; unparsable values are shown as-is
fn display_time(timestamp: &str) -> String {
    rfc3339_to_time_of_day(timestamp).unwrap_or_else(|| timestamp.to_string())
}

impl MessageFormatter {
    /// Format any relay event for the user `me`
    pub fn format_event(event: &OutboundEvent, me: &str) -> String {
        match event {
            OutboundEvent::ReceiveMessage(payload) => Self::format_chat_message(payload, me),
            OutboundEvent::UserJoined(payload) => Self::format_user_joined(payload),
            OutboundEvent::UserLeft(payload) => Self::format_user_left(payload),
            OutboundEvent::UsersList(users) => Self::format_users_list(users, me),
            OutboundEvent::UserTyping(payload) => Self::format_user_typing(payload),
        }
    }

    /// Format the list of joined users
    ///
    /// Entries named `me` are marked. Names are not unique, so several entries may
    /// carry the mark.
    pub fn format_users_list(users: &[UserPayload], me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Online ({}):\n", users.len()));

        if users.is_empty() {
            output.push_str("(No users)\n");
        } else {
            for user in users {
                let me_suffix = if user.username == me { " (me)" } else { "" };
                output.push_str(&format!(
                    "{}{} - joined at {}\n",
                    user.username,
                    me_suffix,
                    display_time(&user.joined_at)
                ));
            }
        }

        output.push_str(&format!("{}\n", RULE));
        output
    }

    pub fn format_user_joined(payload: &SystemMessagePayload) -> String {
        format!("\n+ {} ({})\n", payload.message, display_time(&payload.timestamp))
    }

    pub fn format_user_left(payload: &SystemMessagePayload) -> String {
        format!("\n- {} ({})\n", payload.message, display_time(&payload.timestamp))
    }

    /// Format a chat message. The relay echoes our own messages back.
    pub fn format_chat_message(payload: &ChatMessagePayload, me: &str) -> String {
        let me_suffix = if payload.username == me { " (me)" } else { "" };
        format!(
            "\n\n{rule}\n@{}{}: {}\nsent at {}\n{rule}\n",
            payload.username,
            me_suffix,
            payload.message,
            display_time(&payload.timestamp),
            rule = THIN_RULE
        )
    }

    pub fn format_user_typing(payload: &UserTypingPayload) -> String {
        if payload.is_typing {
            format!("\n… {} is typing\n", payload.username)
        } else {
            format!("\n… {} stopped typing\n", payload.username)
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
