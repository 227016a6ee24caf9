//! Presence relay library.
//!
//! This library provides the server side of a WebSocket chat relay: it tracks
//! which connections have joined with a display name and fans chat, typing and
//! presence events out to every joined client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
