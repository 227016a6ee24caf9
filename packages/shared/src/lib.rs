//! Shared utilities for the Tsudoi relay and client.

pub mod logger;
pub mod time;
